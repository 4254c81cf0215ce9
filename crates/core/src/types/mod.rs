//! CMIS type definitions and their structural validation.
//!
//! A [`TypeDefinition`] describes a class of repository objects. Its variant
//! ([`TypeKind`]) is one of the six CMIS base kinds, each carrying only its own
//! extra fields, or an [`TypeKind::Extension`] for interfaces outside them.
//!
//! Validation never fails on a constructible definition; it reports every
//! violated rule as a [`ValidationError`]:
//!
//! ```
//! use cmistype_core::types::{BaseTypeId, TypeDefinition, validate_type_definition};
//!
//! let td = TypeDefinition::derived_from(BaseTypeId::Folder);
//! let errors = validate_type_definition(&td);
//! assert_eq!(errors[0].to_string(), "id: Type id must be set.");
//! ```

pub mod definition;
pub mod errors;
pub mod validation;

// Re-export commonly used types
pub use definition::{
    BaseTypeId, ContentStreamAllowed, DocumentAttributes, RelationshipAttributes,
    TypeDefinition, TypeKind, TypeMutability,
};
pub use errors::{TypeDefError, ValidationError};
pub use validation::{is_valid_query_name, validate, validate_type_definition};
