use std::fs::File;

use cmistype_core::codec::{self, WireFormat};
use cmistype_core::types::{
    BaseTypeId, ContentStreamAllowed, DocumentAttributes, RelationshipAttributes,
    TypeDefError, TypeDefinition, TypeKind, TypeMutability, validate_type_definition,
};

fn fixture(name: &str) -> File {
    File::open(format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)).unwrap()
}

fn invoice() -> TypeDefinition {
    TypeDefinition {
        id: Some("acme:invoice".into()),
        local_name: Some("invoice".into()),
        local_namespace: Some("http://acme.example/cmis".into()),
        display_name: Some("Invoice".into()),
        query_name: Some("acme:invoice".into()),
        description: Some("Supplier invoices & credit notes".into()),
        base_type_id: Some(BaseTypeId::Document),
        parent_type_id: Some("cmis:document".into()),
        creatable: Some(true),
        fileable: Some(true),
        queryable: Some(true),
        fulltext_indexed: Some(false),
        included_in_supertype_query: Some(true),
        controllable_policy: Some(false),
        controllable_acl: Some(true),
        type_mutability: Some(TypeMutability {
            create: Some(false),
            update: Some(true),
            delete: Some(true),
        }),
        kind: TypeKind::Document(DocumentAttributes {
            versionable: Some(true),
            content_stream_allowed: Some(ContentStreamAllowed::Required),
        }),
    }
}

fn samples() -> Vec<TypeDefinition> {
    let mut relationship = TypeDefinition::derived_from(BaseTypeId::Relationship);
    relationship.id = Some("acme:approves".into());
    relationship.kind = TypeKind::Relationship(RelationshipAttributes {
        allowed_source_types: vec!["acme:approver".into(), "cmis:item".into()],
        allowed_target_types: vec!["acme:invoice".into()],
    });

    let mut secondary = TypeDefinition::derived_from(BaseTypeId::Secondary);
    secondary.display_name = Some("Ünïcode <tagged> \"secondary\"".into());
    secondary.queryable = Some(false);
    secondary.type_mutability = Some(TypeMutability::default());

    let mut empty_strings = TypeDefinition::derived_from(BaseTypeId::Policy);
    empty_strings.id = Some(String::new());
    empty_strings.query_name = Some(String::new());

    vec![
        invoice(),
        relationship,
        secondary,
        empty_strings,
        TypeDefinition::derived_from(BaseTypeId::Folder),
        TypeDefinition::derived_from(BaseTypeId::Item),
    ]
}

#[test]
fn xml_and_json_fixtures_decode_to_the_same_record() {
    let from_xml = codec::read_xml(fixture("invoice_type.xml")).unwrap();
    let from_json = codec::read_json(fixture("invoice_type.json")).unwrap();
    assert_eq!(from_xml, invoice());
    assert_eq!(from_json, invoice());
    assert!(validate_type_definition(&from_xml).is_empty());
}

#[test]
fn xml_round_trip() {
    for td in samples() {
        let mut out = Vec::new();
        codec::write_xml(&td, &mut out).unwrap();
        assert_eq!(codec::read_xml(out.as_slice()).unwrap(), td);
    }
}

#[test]
fn json_round_trip() {
    for td in samples() {
        for pretty in [false, true] {
            let mut out = Vec::new();
            codec::write(WireFormat::Json, &td, &mut out, pretty).unwrap();
            assert_eq!(codec::read(WireFormat::Json, out.as_slice()).unwrap(), td);
        }
    }
}

#[test]
fn xml_carries_records_json_cannot() {
    let mut mismatched = invoice();
    mismatched.base_type_id = Some(BaseTypeId::Folder);
    let mut no_base = invoice();
    no_base.base_type_id = None;

    for td in [mismatched, no_base] {
        let mut xml = Vec::new();
        codec::write_xml(&td, &mut xml).unwrap();
        assert_eq!(codec::read_xml(xml.as_slice()).unwrap(), td);

        let mut json = Vec::new();
        let err = codec::write_json(&td, &mut json).unwrap_err();
        assert!(matches!(err, TypeDefError::Schema(_)), "{err:?}");
    }
}

#[test]
fn writers_leave_the_stream_usable() {
    let td = invoice();
    let mut out = Vec::new();
    codec::write_xml(&td, &mut out).unwrap();
    let xml_len = out.len();
    codec::write_json(&td, &mut out).unwrap();
    assert!(out.len() > xml_len);

    let mut input = std::io::Cursor::new(&out[xml_len..]);
    assert_eq!(codec::read_json(&mut input).unwrap(), td);
}

#[test]
fn json_top_level_array_is_schema_error() {
    let err = codec::read_json(&b"[1, 2, 3]"[..]).unwrap_err();
    assert!(matches!(err, TypeDefError::Schema(_)), "{err:?}");
}
