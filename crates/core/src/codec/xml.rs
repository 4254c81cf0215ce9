//! XML encoding, in the CMIS core schema shape.
//!
//! ```xml
//! <cmis:typeDefinition xmlns:cmis="..." xmlns:xsi="..."
//!     xsi:type="cmis:cmisTypeFolderDefinitionType">
//!   <cmis:id>cmis:folder</cmis:id>
//!   ...
//! </cmis:typeDefinition>
//! ```
//!
//! The variant travels in `xsi:type`, independently of `baseId`, so a
//! [`TypeDefinition`] can be written and read back unchanged. An `xsi:type`
//! names a base kind only when it is unprefixed or its prefix is bound to the
//! CMIS namespace; any other value is an extension interface. Extensions that
//! would read back as a base kind (`cmis:cmisTypeFolderDefinitionType`) are
//! refused on write.

use std::io::{BufReader, Read, Write};

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};

use super::WireFormat;
use crate::types::{BaseTypeId, TypeDefError, TypeDefinition, TypeKind, TypeMutability};

const CMIS_NAMESPACE: &str = "http://docs.oasis-open.org/ns/cmis/core/200908/";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const ROOT_ELEMENT: &str = "typeDefinition";

static XSI_TYPES: [(BaseTypeId, &str); 6] = [
    (BaseTypeId::Document, "cmisTypeDocumentDefinitionType"),
    (BaseTypeId::Folder, "cmisTypeFolderDefinitionType"),
    (BaseTypeId::Relationship, "cmisTypeRelationshipDefinitionType"),
    (BaseTypeId::Policy, "cmisTypePolicyDefinitionType"),
    (BaseTypeId::Item, "cmisTypeItemDefinitionType"),
    (BaseTypeId::Secondary, "cmisTypeSecondaryDefinitionType"),
];

/// Write a type definition as indented XML.
pub fn write_xml<W: Write>(type_def: &TypeDefinition, out: &mut W) -> Result<(), TypeDefError> {
    let xml = to_xml_string(type_def)?;
    out.write_all(xml.as_bytes())?;
    out.flush()?;
    tracing::debug!(type_id = ?type_def.id, "wrote type definition as XML");
    Ok(())
}

/// Read a type definition from XML.
///
/// Elements outside the type definition's own attributes (for example
/// `propertyDefinitions`) are skipped.
pub fn read_xml<R: Read>(input: R) -> Result<TypeDefinition, TypeDefError> {
    let mut reader = Reader::from_reader(BufReader::new(input));
    let mut buf = Vec::new();
    let mut parser = XmlParser::default();

    loop {
        match reader.read_event_into(&mut buf).map_err(malformed)? {
            Event::Start(e) => parser.start(&e)?,
            Event::Empty(e) => {
                parser.start(&e)?;
                parser.end()?;
            }
            Event::End(_) => parser.end()?,
            Event::Text(e) => {
                let text = e.unescape().map_err(malformed)?;
                parser.text(&text)?;
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e).map_err(malformed)?;
                parser.text(text)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let type_def = parser.finish()?;
    tracing::debug!(type_id = ?type_def.id, "read type definition from XML");
    Ok(type_def)
}

fn to_xml_string(type_def: &TypeDefinition) -> Result<String, TypeDefError> {
    let mut xml = XmlBuilder::default();

    xml.line(0, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.line(
        0,
        &format!(
            r#"<cmis:{ROOT_ELEMENT} xmlns:cmis="{CMIS_NAMESPACE}" xmlns:xsi="{XSI_NAMESPACE}" xsi:type="{}">"#,
            escape(&xsi_type(&type_def.kind)?)
        ),
    );

    xml.text(1, "id", type_def.id.as_deref());
    xml.text(1, "localName", type_def.local_name.as_deref());
    xml.text(1, "localNamespace", type_def.local_namespace.as_deref());
    xml.text(1, "displayName", type_def.display_name.as_deref());
    xml.text(1, "queryName", type_def.query_name.as_deref());
    xml.text(1, "description", type_def.description.as_deref());
    xml.text(1, "baseId", type_def.base_type_id.map(|b| b.value()));
    xml.text(1, "parentId", type_def.parent_type_id.as_deref());
    xml.flag(1, "creatable", type_def.creatable);
    xml.flag(1, "fileable", type_def.fileable);
    xml.flag(1, "queryable", type_def.queryable);
    xml.flag(1, "fulltextIndexed", type_def.fulltext_indexed);
    xml.flag(1, "includedInSupertypeQuery", type_def.included_in_supertype_query);
    xml.flag(1, "controllablePolicy", type_def.controllable_policy);
    xml.flag(1, "controllableACL", type_def.controllable_acl);

    if let Some(mutability) = &type_def.type_mutability {
        xml.line(1, "<cmis:typeMutability>");
        xml.flag(2, "create", mutability.create);
        xml.flag(2, "update", mutability.update);
        xml.flag(2, "delete", mutability.delete);
        xml.line(1, "</cmis:typeMutability>");
    }

    match &type_def.kind {
        TypeKind::Document(doc) => {
            xml.flag(1, "versionable", doc.versionable);
            xml.text(1, "contentStreamAllowed", doc.content_stream_allowed.map(|c| c.as_str()));
        }
        TypeKind::Relationship(rel) => {
            for source in &rel.allowed_source_types {
                xml.text(1, "allowedSourceTypes", Some(source.as_str()));
            }
            for target in &rel.allowed_target_types {
                xml.text(1, "allowedTargetTypes", Some(target.as_str()));
            }
        }
        _ => {}
    }

    xml.line(0, &format!("</cmis:{ROOT_ELEMENT}>"));
    Ok(xml.buf)
}

fn xsi_type(kind: &TypeKind) -> Result<String, TypeDefError> {
    match kind {
        TypeKind::Extension(interface) => {
            let written = [("cmis".to_string(), CMIS_NAMESPACE.to_string())];
            if let TypeKind::Extension(_) = kind_from_xsi_type(interface, &written) {
                Ok(interface.clone())
            } else {
                Err(TypeDefError::schema(format!(
                    "extension interface '{interface}' would read back as a base type"
                )))
            }
        }
        other => {
            let local = other
                .base_type_id()
                .and_then(|base| XSI_TYPES.iter().find(|(b, _)| *b == base))
                .map_or("", |(_, name)| *name);
            Ok(format!("cmis:{}", local))
        }
    }
}

/// Map an `xsi:type` QName to a variant, given the root's `xmlns:` bindings.
fn kind_from_xsi_type(value: &str, bindings: &[(String, String)]) -> TypeKind {
    let (prefix, local) = match value.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, value),
    };
    let in_cmis_namespace = prefix.is_none_or(|prefix| {
        bindings.iter().any(|(bound, uri)| bound == prefix && uri == CMIS_NAMESPACE)
    });

    XSI_TYPES
        .iter()
        .find(|(_, name)| in_cmis_namespace && *name == local)
        .map_or_else(|| TypeKind::Extension(value.to_string()), |(base, _)| TypeKind::for_base(*base))
}

#[derive(Default)]
struct XmlBuilder {
    buf: String,
}

impl XmlBuilder {
    fn line(&mut self, depth: usize, line: &str) {
        self.buf.push_str(&"  ".repeat(depth));
        self.buf.push_str(line);
        self.buf.push('\n');
    }

    fn text(&mut self, depth: usize, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.line(depth, &format!("<cmis:{name}>{}</cmis:{name}>", escape(value)));
        }
    }

    fn flag(&mut self, depth: usize, name: &str, value: Option<bool>) {
        self.text(depth, name, value.map(|v| if v { "true" } else { "false" }));
    }
}

/// Event-driven builder of a [`TypeDefinition`].
#[derive(Default)]
struct XmlParser {
    type_def: Option<TypeDefinition>,
    root_closed: bool,
    /// Local names of the currently open elements.
    stack: Vec<String>,
    text: String,
}

impl XmlParser {
    fn start(&mut self, e: &BytesStart<'_>) -> Result<(), TypeDefError> {
        let name = std::str::from_utf8(e.local_name().as_ref()).map_err(malformed)?.to_string();

        if self.root_closed {
            return Err(malformed(format!("unexpected <{name}> after the root element")));
        }

        if self.stack.is_empty() {
            if name != ROOT_ELEMENT {
                return Err(TypeDefError::schema(format!(
                    "expected <{ROOT_ELEMENT}> root element, found <{name}>"
                )));
            }
            let xsi = xsi_type_attribute(e)?.ok_or_else(|| {
                TypeDefError::schema(format!("<{ROOT_ELEMENT}> has no xsi:type attribute"))
            })?;
            let bindings = namespace_bindings(e)?;
            self.type_def = Some(TypeDefinition::new(kind_from_xsi_type(&xsi, &bindings)));
        }

        self.stack.push(name);
        self.text.clear();
        Ok(())
    }

    fn end(&mut self) -> Result<(), TypeDefError> {
        let name = self.stack.pop().ok_or_else(|| malformed("unmatched end tag"))?;
        let text = std::mem::take(&mut self.text);

        match self.stack.len() {
            0 => self.root_closed = true,
            1 => self.apply_field(&name, text)?,
            2 if self.stack[1] == "typeMutability" => self.apply_mutability(&name, &text)?,
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), TypeDefError> {
        if self.stack.len() >= 2 {
            self.text.push_str(text);
        } else if self.stack.is_empty() && !text.trim().is_empty() {
            return Err(malformed("text outside the root element"));
        }
        Ok(())
    }

    fn finish(self) -> Result<TypeDefinition, TypeDefError> {
        if let Some(open) = self.stack.last() {
            return Err(malformed(format!("unexpected end of input inside <{open}>")));
        }
        self.type_def.ok_or_else(|| malformed("no root element"))
    }

    fn apply_field(&mut self, name: &str, text: String) -> Result<(), TypeDefError> {
        let Some(td) = self.type_def.as_mut() else {
            return Ok(());
        };

        match name {
            "id" => td.id = Some(text),
            "localName" => td.local_name = Some(text),
            "localNamespace" => td.local_namespace = Some(text),
            "displayName" => td.display_name = Some(text),
            "queryName" => td.query_name = Some(text),
            "description" => td.description = Some(text),
            "baseId" => {
                td.base_type_id =
                    Some(text.trim().parse::<BaseTypeId>().map_err(TypeDefError::Schema)?)
            }
            "parentId" => td.parent_type_id = Some(text),
            "creatable" => td.creatable = Some(parse_bool(name, &text)?),
            "fileable" => td.fileable = Some(parse_bool(name, &text)?),
            "queryable" => td.queryable = Some(parse_bool(name, &text)?),
            "fulltextIndexed" => td.fulltext_indexed = Some(parse_bool(name, &text)?),
            "includedInSupertypeQuery" => {
                td.included_in_supertype_query = Some(parse_bool(name, &text)?)
            }
            "controllablePolicy" => td.controllable_policy = Some(parse_bool(name, &text)?),
            "controllableACL" => td.controllable_acl = Some(parse_bool(name, &text)?),
            "typeMutability" => {
                td.type_mutability.get_or_insert_with(TypeMutability::default);
            }
            "versionable" | "contentStreamAllowed" => match &mut td.kind {
                TypeKind::Document(doc) if name == "versionable" => {
                    doc.versionable = Some(parse_bool(name, &text)?)
                }
                TypeKind::Document(doc) => {
                    doc.content_stream_allowed =
                        Some(text.trim().parse().map_err(TypeDefError::Schema)?)
                }
                _ => tracing::debug!(element = name, "ignoring document attribute on non-document type"),
            },
            "allowedSourceTypes" | "allowedTargetTypes" => match &mut td.kind {
                TypeKind::Relationship(rel) if name == "allowedSourceTypes" => {
                    rel.allowed_source_types.push(text)
                }
                TypeKind::Relationship(rel) => rel.allowed_target_types.push(text),
                _ => tracing::debug!(
                    element = name,
                    "ignoring relationship attribute on non-relationship type"
                ),
            },
            _ => tracing::trace!(element = name, "skipping element"),
        }
        Ok(())
    }

    fn apply_mutability(&mut self, name: &str, text: &str) -> Result<(), TypeDefError> {
        let Some(td) = self.type_def.as_mut() else {
            return Ok(());
        };
        let mutability = td.type_mutability.get_or_insert_with(TypeMutability::default);

        match name {
            "create" => mutability.create = Some(parse_bool(name, text)?),
            "update" => mutability.update = Some(parse_bool(name, text)?),
            "delete" => mutability.delete = Some(parse_bool(name, text)?),
            _ => tracing::trace!(element = name, "skipping element"),
        }
        Ok(())
    }
}

/// Value of the root's `xsi:type` attribute (any non-xmlns prefix on `type`).
fn xsi_type_attribute(e: &BytesStart<'_>) -> Result<Option<String>, TypeDefError> {
    for attr in e.attributes() {
        let attr = attr.map_err(malformed)?;
        let prefixed = attr.key.prefix().is_some_and(|p| p.as_ref() != b"xmlns");
        if prefixed && attr.key.local_name().as_ref() == b"type" {
            let value = attr.unescape_value().map_err(malformed)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// `xmlns:prefix="uri"` declarations on an element.
fn namespace_bindings(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, TypeDefError> {
    let mut bindings = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(malformed)?;
        if attr.key.prefix().is_some_and(|p| p.as_ref() == b"xmlns") {
            let prefix = std::str::from_utf8(attr.key.local_name().as_ref())
                .map_err(malformed)?
                .to_string();
            let uri = attr.unescape_value().map_err(malformed)?.into_owned();
            bindings.push((prefix, uri));
        }
    }
    Ok(bindings)
}

/// xsd:boolean lexical forms.
fn parse_bool(name: &str, text: &str) -> Result<bool, TypeDefError> {
    match text.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(TypeDefError::schema(format!("invalid boolean '{other}' in <{name}>"))),
    }
}

fn malformed(message: impl std::fmt::Display) -> TypeDefError {
    TypeDefError::malformed(WireFormat::Xml, message)
}
