//! Structural validation of type definitions.

use std::sync::LazyLock;

use regex::Regex;

use super::definition::{BaseTypeId, TypeDefinition, TypeKind};
use super::errors::{TypeDefError, ValidationError};

// Characters a query name must not contain: space , " ' \ . ( )
static QUERY_NAME_FORBIDDEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[ ,"'\\.()]"#).unwrap());

/// Validate an optional type definition.
///
/// Fails with [`TypeDefError::InvalidArgument`] when no definition is given;
/// otherwise see [`validate_type_definition`].
pub fn validate(
    type_def: Option<&TypeDefinition>,
) -> Result<Vec<ValidationError>, TypeDefError> {
    let type_def = type_def
        .ok_or_else(|| TypeDefError::InvalidArgument("type definition must be set".into()))?;
    Ok(validate_type_definition(type_def))
}

/// Validate a type definition.
///
/// Returns one error per violated rule, in a fixed order. An empty list
/// means the definition is valid. All rules are evaluated; none stops the
/// others.
pub fn validate_type_definition(type_def: &TypeDefinition) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if is_blank(&type_def.id) {
        errors.push(ValidationError::new("id", "Type id must be set."));
    }

    if is_blank(&type_def.local_name) {
        errors.push(ValidationError::new("localName", "Local name must be set."));
    }

    if let Some(query_name) = &type_def.query_name {
        if query_name.is_empty() {
            errors.push(ValidationError::new("queryName", "Query name must not be empty."));
        } else if !is_valid_query_name(query_name) {
            errors.push(ValidationError::new(
                "queryName",
                "Query name contains invalid characters.",
            ));
        }
    }

    let flags = [
        ("creatable", "Creatable", type_def.creatable),
        ("fileable", "Fileable", type_def.fileable),
        ("queryable", "Queryable", type_def.queryable),
        ("controllablePolicy", "ControllablePolicy", type_def.controllable_policy),
        ("controllableACL", "ControllableACL", type_def.controllable_acl),
        ("fulltextIndexed", "FulltextIndexed", type_def.fulltext_indexed),
        (
            "includedInSupertypeQuery",
            "IncludedInSupertypeQuery",
            type_def.included_in_supertype_query,
        ),
    ];
    for (attribute, label, value) in flags {
        if value.is_none() {
            errors.push(ValidationError::new(attribute, format!("{} flag must be set.", label)));
        }
    }

    if type_def.queryable == Some(true) && is_blank(&type_def.query_name) {
        errors.push(ValidationError::new(
            "queryable",
            "Queryable flag is set to TRUE, but the query name is not set.",
        ));
    }

    match type_def.base_type_id {
        None => errors.push(ValidationError::new("baseId", "Base type id must be set.")),
        // Base types are their own root: compared against the parent id,
        // which makes the exemption apply only when parent == base value.
        Some(base) if type_def.parent_type_id.as_deref() != Some(base.value()) => {
            if is_blank(&type_def.parent_type_id) {
                errors.push(ValidationError::new("parentTypeId", "Parent type id must be set."));
            }
        }
        Some(_) => {}
    }

    validate_kind(type_def, &mut errors);

    tracing::debug!(
        type_id = type_def.id.as_deref().unwrap_or("<unset>"),
        errors = errors.len(),
        "validated type definition"
    );

    errors
}

/// Variant checks: declared base kind vs. carried variant, plus the
/// variant's own required fields.
fn validate_kind(type_def: &TypeDefinition, errors: &mut Vec<ValidationError>) {
    let expected = match &type_def.kind {
        TypeKind::Document(_) => BaseTypeId::Document,
        TypeKind::Folder => BaseTypeId::Folder,
        TypeKind::Relationship(_) => BaseTypeId::Relationship,
        TypeKind::Policy => BaseTypeId::Policy,
        TypeKind::Item => BaseTypeId::Item,
        TypeKind::Secondary => BaseTypeId::Secondary,
        TypeKind::Extension(interface) => {
            tracing::debug!(interface = %interface, "type definition carries an extension variant");
            errors.push(ValidationError::new("baseId", "Unknown base interface."));
            return;
        }
    };

    if type_def.base_type_id != Some(expected) {
        errors.push(ValidationError::new("baseId", "Base type id does not match the type."));
    }

    if let TypeKind::Document(doc) = &type_def.kind {
        if doc.versionable.is_none() {
            errors.push(ValidationError::new("versionable", "Versionable flag must be set."));
        }
        if doc.content_stream_allowed.is_none() {
            errors.push(ValidationError::new(
                "contentStreamAllowed",
                "ContentStreamAllowed flag must be set.",
            ));
        }
    }
}

/// Check a non-empty query name for forbidden characters.
pub fn is_valid_query_name(query_name: &str) -> bool {
    !query_name.is_empty() && !QUERY_NAME_FORBIDDEN_RE.is_match(query_name)
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}
