//! JSON encoding, in the CMIS browser binding shape.
//!
//! The variant is not carried explicitly: it is derived from `baseId`. A
//! definition is therefore representable only when `baseId` is set and
//! agrees with the variant.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::error::Category;

use super::WireFormat;
use crate::types::{
    BaseTypeId, ContentStreamAllowed, DocumentAttributes, RelationshipAttributes,
    TypeDefError, TypeDefinition, TypeKind, TypeMutability,
};

/// Flat wire shape. Variant fields are present only for their base kind.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonTypeDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    local_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    local_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    query_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_id: Option<BaseTypeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    creatable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fileable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    queryable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fulltext_indexed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    included_in_supertype_query: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    controllable_policy: Option<bool>,
    #[serde(default, rename = "controllableACL", skip_serializing_if = "Option::is_none")]
    controllable_acl: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    type_mutability: Option<TypeMutability>,

    // cmis:document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    versionable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_stream_allowed: Option<ContentStreamAllowed>,

    // cmis:relationship
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allowed_source_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allowed_target_types: Option<Vec<String>>,
}

/// Write a type definition as compact JSON.
pub fn write_json<W: Write>(type_def: &TypeDefinition, out: &mut W) -> Result<(), TypeDefError> {
    let wire = to_wire(type_def)?;
    serde_json::to_writer(&mut *out, &wire).map_err(write_error)?;
    out.flush()?;
    tracing::debug!(type_id = ?type_def.id, "wrote type definition as JSON");
    Ok(())
}

/// Write a type definition as indented JSON.
pub fn write_json_pretty<W: Write>(
    type_def: &TypeDefinition,
    out: &mut W,
) -> Result<(), TypeDefError> {
    let wire = to_wire(type_def)?;
    serde_json::to_writer_pretty(&mut *out, &wire).map_err(write_error)?;
    out.flush()?;
    tracing::debug!(type_id = ?type_def.id, "wrote type definition as pretty JSON");
    Ok(())
}

/// Read a type definition from JSON.
///
/// The top-level value must be an object carrying a `baseId`.
pub fn read_json<R: Read>(input: R) -> Result<TypeDefinition, TypeDefError> {
    let value: Value = serde_json::from_reader(input).map_err(read_error)?;

    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(TypeDefError::schema(format!(
                "expected a JSON object, found {}",
                json_type_name(&other)
            )));
        }
    };

    let wire: JsonTypeDefinition = serde_json::from_value(Value::Object(map))
        .map_err(|e| TypeDefError::schema(e.to_string()))?;

    let type_def = from_wire(wire)?;
    tracing::debug!(type_id = ?type_def.id, "read type definition from JSON");
    Ok(type_def)
}

fn to_wire(type_def: &TypeDefinition) -> Result<JsonTypeDefinition, TypeDefError> {
    let base = match (type_def.base_type_id, type_def.kind.base_type_id()) {
        (Some(declared), Some(carried)) if declared == carried => declared,
        _ => {
            return Err(TypeDefError::schema(format!(
                "type definition '{}' cannot be represented in JSON: baseId must be set and match its variant",
                type_def.id.as_deref().unwrap_or_default()
            )));
        }
    };

    let mut wire = JsonTypeDefinition {
        id: type_def.id.clone(),
        local_name: type_def.local_name.clone(),
        local_namespace: type_def.local_namespace.clone(),
        display_name: type_def.display_name.clone(),
        query_name: type_def.query_name.clone(),
        description: type_def.description.clone(),
        base_id: Some(base),
        parent_id: type_def.parent_type_id.clone(),
        creatable: type_def.creatable,
        fileable: type_def.fileable,
        queryable: type_def.queryable,
        fulltext_indexed: type_def.fulltext_indexed,
        included_in_supertype_query: type_def.included_in_supertype_query,
        controllable_policy: type_def.controllable_policy,
        controllable_acl: type_def.controllable_acl,
        type_mutability: type_def.type_mutability.clone(),
        ..Default::default()
    };

    match &type_def.kind {
        TypeKind::Document(doc) => {
            wire.versionable = doc.versionable;
            wire.content_stream_allowed = doc.content_stream_allowed;
        }
        TypeKind::Relationship(rel) => {
            wire.allowed_source_types = non_empty(&rel.allowed_source_types);
            wire.allowed_target_types = non_empty(&rel.allowed_target_types);
        }
        _ => {}
    }

    Ok(wire)
}

fn from_wire(wire: JsonTypeDefinition) -> Result<TypeDefinition, TypeDefError> {
    let base = wire
        .base_id
        .ok_or_else(|| TypeDefError::schema("type definition has no baseId"))?;

    let kind = match base {
        BaseTypeId::Document => TypeKind::Document(DocumentAttributes {
            versionable: wire.versionable,
            content_stream_allowed: wire.content_stream_allowed,
        }),
        BaseTypeId::Relationship => TypeKind::Relationship(RelationshipAttributes {
            allowed_source_types: wire.allowed_source_types.unwrap_or_default(),
            allowed_target_types: wire.allowed_target_types.unwrap_or_default(),
        }),
        other => TypeKind::for_base(other),
    };

    Ok(TypeDefinition {
        id: wire.id,
        local_name: wire.local_name,
        local_namespace: wire.local_namespace,
        display_name: wire.display_name,
        query_name: wire.query_name,
        description: wire.description,
        base_type_id: Some(base),
        parent_type_id: wire.parent_id,
        creatable: wire.creatable,
        fileable: wire.fileable,
        queryable: wire.queryable,
        fulltext_indexed: wire.fulltext_indexed,
        included_in_supertype_query: wire.included_in_supertype_query,
        controllable_policy: wire.controllable_policy,
        controllable_acl: wire.controllable_acl,
        type_mutability: wire.type_mutability,
        kind,
    })
}

fn non_empty(types: &[String]) -> Option<Vec<String>> {
    if types.is_empty() { None } else { Some(types.to_vec()) }
}

fn read_error(e: serde_json::Error) -> TypeDefError {
    match e.classify() {
        Category::Io => TypeDefError::Io(e.into()),
        Category::Syntax | Category::Eof => TypeDefError::malformed(WireFormat::Json, e),
        Category::Data => TypeDefError::schema(e.to_string()),
    }
}

fn write_error(e: serde_json::Error) -> TypeDefError {
    match e.classify() {
        Category::Io => TypeDefError::Io(e.into()),
        _ => TypeDefError::schema(e.to_string()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(s: &str) -> Result<TypeDefinition, TypeDefError> {
        read_json(s.as_bytes())
    }

    #[test]
    fn test_read_minimal_folder() {
        let td = decode(r#"{"id": "f", "baseId": "cmis:folder"}"#).unwrap();
        assert_eq!(td.id.as_deref(), Some("f"));
        assert_eq!(td.base_type_id, Some(BaseTypeId::Folder));
        assert_eq!(td.kind, TypeKind::Folder);
        assert!(td.creatable.is_none());
    }

    #[test]
    fn test_read_document_fields() {
        let td = decode(
            r#"{"id": "d", "baseId": "cmis:document", "versionable": true,
                "contentStreamAllowed": "required", "controllableACL": false}"#,
        )
        .unwrap();
        assert_eq!(td.controllable_acl, Some(false));
        let doc = td.document().unwrap();
        assert_eq!(doc.versionable, Some(true));
        assert_eq!(doc.content_stream_allowed, Some(ContentStreamAllowed::Required));
    }

    #[test]
    fn test_null_reads_as_unset() {
        let td = decode(r#"{"baseId": "cmis:item", "queryName": null, "creatable": null}"#).unwrap();
        assert!(td.query_name.is_none());
        assert!(td.creatable.is_none());
    }

    #[test]
    fn test_document_fields_ignored_for_other_kinds() {
        let td = decode(r#"{"baseId": "cmis:policy", "versionable": true}"#).unwrap();
        assert_eq!(td.kind, TypeKind::Policy);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let td = decode(r#"{"baseId": "cmis:secondary", "propertyDefinitions": {}}"#).unwrap();
        assert_eq!(td.kind, TypeKind::Secondary);
    }

    #[test]
    fn test_array_is_schema_error() {
        let err = decode(r#"[{"baseId": "cmis:folder"}]"#).unwrap_err();
        assert!(matches!(err, TypeDefError::Schema(ref m) if m.contains("array")), "{err:?}");
    }

    #[test]
    fn test_missing_base_id_is_schema_error() {
        assert!(matches!(decode(r#"{"id": "x"}"#), Err(TypeDefError::Schema(_))));
    }

    #[test]
    fn test_wrong_value_type_is_schema_error() {
        let err = decode(r#"{"baseId": "cmis:folder", "creatable": "yes"}"#).unwrap_err();
        assert!(matches!(err, TypeDefError::Schema(_)));
        let err = decode(r#"{"baseId": "cmis:widget"}"#).unwrap_err();
        assert!(matches!(err, TypeDefError::Schema(_)));
    }

    #[test]
    fn test_malformed_is_format_error() {
        for input in ["", "{", r#"{"id": }"#, "{} trailing"] {
            let err = decode(input).unwrap_err();
            assert!(
                matches!(err, TypeDefError::Format { format: WireFormat::Json, .. }),
                "{input:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_write_rejects_mismatched_base() {
        let mut td = TypeDefinition::derived_from(BaseTypeId::Folder);
        td.kind = TypeKind::document();
        let mut out = Vec::new();
        assert!(matches!(write_json(&td, &mut out), Err(TypeDefError::Schema(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_rejects_extension_and_unset_base() {
        let mut out = Vec::new();
        let ext = TypeDefinition::new(TypeKind::Extension("x".into()));
        assert!(write_json(&ext, &mut out).is_err());
        let unset = TypeDefinition::new(TypeKind::Folder);
        assert!(write_json(&unset, &mut out).is_err());
    }

    #[test]
    fn test_write_omits_unset_and_foreign_fields() {
        let mut td = TypeDefinition::derived_from(BaseTypeId::Folder);
        td.id = Some("f".into());
        td.controllable_acl = Some(true);
        let mut out = Vec::new();
        write_json(&td, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"{"id":"f","baseId":"cmis:folder","controllableACL":true}"#
        );
    }

    #[test]
    fn test_relationship_types_round_trip() {
        let mut td = TypeDefinition::derived_from(BaseTypeId::Relationship);
        td.kind = TypeKind::Relationship(RelationshipAttributes {
            allowed_source_types: vec!["cmis:document".into()],
            allowed_target_types: vec![],
        });
        let mut out = Vec::new();
        write_json_pretty(&td, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"allowedSourceTypes\""));
        assert!(!text.contains("allowedTargetTypes"));
        assert_eq!(decode(&text).unwrap(), td);
    }
}
