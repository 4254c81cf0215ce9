//! Type definition structures.

use serde::{Deserialize, Serialize};

/// Base type kinds every type definition ultimately derives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseTypeId {
    #[serde(rename = "cmis:document")]
    Document,
    #[serde(rename = "cmis:folder")]
    Folder,
    #[serde(rename = "cmis:relationship")]
    Relationship,
    #[serde(rename = "cmis:policy")]
    Policy,
    #[serde(rename = "cmis:item")]
    Item,
    #[serde(rename = "cmis:secondary")]
    Secondary,
}

impl BaseTypeId {
    /// All base kinds, in protocol order.
    pub const ALL: [BaseTypeId; 6] = [
        Self::Document,
        Self::Folder,
        Self::Relationship,
        Self::Policy,
        Self::Item,
        Self::Secondary,
    ];

    /// Canonical wire value (also the id of the base type itself).
    pub fn value(&self) -> &'static str {
        match self {
            Self::Document => "cmis:document",
            Self::Folder => "cmis:folder",
            Self::Relationship => "cmis:relationship",
            Self::Policy => "cmis:policy",
            Self::Item => "cmis:item",
            Self::Secondary => "cmis:secondary",
        }
    }
}

impl std::fmt::Display for BaseTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl std::str::FromStr for BaseTypeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|base| base.value() == s)
            .ok_or_else(|| format!("unknown base type id: {}", s))
    }
}

/// Whether documents of a type may, must, or must not carry content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStreamAllowed {
    NotAllowed,
    Allowed,
    Required,
}

impl ContentStreamAllowed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAllowed => "notallowed",
            Self::Allowed => "allowed",
            Self::Required => "required",
        }
    }
}

impl std::fmt::Display for ContentStreamAllowed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContentStreamAllowed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notallowed" => Ok(Self::NotAllowed),
            "allowed" => Ok(Self::Allowed),
            "required" => Ok(Self::Required),
            _ => Err(format!("unknown content stream setting: {}", s)),
        }
    }
}

/// Which type-level operations a repository permits on a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMutability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
}

/// Fields only document types carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentAttributes {
    pub versionable: Option<bool>,
    pub content_stream_allowed: Option<ContentStreamAllowed>,
}

/// Fields only relationship types carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipAttributes {
    /// Type ids allowed as relationship source (empty = any).
    pub allowed_source_types: Vec<String>,
    /// Type ids allowed as relationship target (empty = any).
    pub allowed_target_types: Vec<String>,
}

/// The variant a type definition carries.
///
/// The six base kinds are closed. `Extension` is the open end for
/// interfaces outside the protocol's base kinds; it names the interface
/// as it appeared on the wire and never validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Document(DocumentAttributes),
    Folder,
    Relationship(RelationshipAttributes),
    Policy,
    Item,
    Secondary,
    Extension(String),
}

impl TypeKind {
    /// A document variant with no document fields set.
    pub fn document() -> Self {
        Self::Document(DocumentAttributes::default())
    }

    /// A relationship variant with no allowed types.
    pub fn relationship() -> Self {
        Self::Relationship(RelationshipAttributes::default())
    }

    /// The variant matching a base kind, with its own fields unset.
    pub fn for_base(base: BaseTypeId) -> Self {
        match base {
            BaseTypeId::Document => Self::document(),
            BaseTypeId::Folder => Self::Folder,
            BaseTypeId::Relationship => Self::relationship(),
            BaseTypeId::Policy => Self::Policy,
            BaseTypeId::Item => Self::Item,
            BaseTypeId::Secondary => Self::Secondary,
        }
    }

    /// The base kind this variant belongs to, or `None` for extensions.
    pub fn base_type_id(&self) -> Option<BaseTypeId> {
        match self {
            Self::Document(_) => Some(BaseTypeId::Document),
            Self::Folder => Some(BaseTypeId::Folder),
            Self::Relationship(_) => Some(BaseTypeId::Relationship),
            Self::Policy => Some(BaseTypeId::Policy),
            Self::Item => Some(BaseTypeId::Item),
            Self::Secondary => Some(BaseTypeId::Secondary),
            Self::Extension(_) => None,
        }
    }
}

/// A CMIS type definition.
///
/// Every attribute is optional so that incomplete definitions can be
/// decoded and reported on by the validator rather than rejected up front.
/// Tri-state flags are `Option<bool>`: `None` means unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    /// Unique type identifier.
    pub id: Option<String>,

    /// Repository-local name.
    pub local_name: Option<String>,

    pub local_namespace: Option<String>,

    /// Human-readable name.
    pub display_name: Option<String>,

    /// Name used to reference the type in queries.
    pub query_name: Option<String>,

    pub description: Option<String>,

    /// Declared base kind. Expected to agree with `kind`.
    pub base_type_id: Option<BaseTypeId>,

    /// Id of the parent type.
    pub parent_type_id: Option<String>,

    pub creatable: Option<bool>,
    pub fileable: Option<bool>,
    pub queryable: Option<bool>,
    pub fulltext_indexed: Option<bool>,
    pub included_in_supertype_query: Option<bool>,
    pub controllable_policy: Option<bool>,
    pub controllable_acl: Option<bool>,

    pub type_mutability: Option<TypeMutability>,

    /// Variant and its variant-specific fields.
    pub kind: TypeKind,
}

impl TypeDefinition {
    /// Create a type definition of the given variant with every attribute unset.
    pub fn new(kind: TypeKind) -> Self {
        Self {
            id: None,
            local_name: None,
            local_namespace: None,
            display_name: None,
            query_name: None,
            description: None,
            base_type_id: None,
            parent_type_id: None,
            creatable: None,
            fileable: None,
            queryable: None,
            fulltext_indexed: None,
            included_in_supertype_query: None,
            controllable_policy: None,
            controllable_acl: None,
            type_mutability: None,
            kind,
        }
    }

    /// Create a type definition deriving from `base`, with `base_type_id`
    /// set and the matching variant.
    pub fn derived_from(base: BaseTypeId) -> Self {
        Self { base_type_id: Some(base), ..Self::new(TypeKind::for_base(base)) }
    }

    /// Document fields, if this is a document type.
    pub fn document(&self) -> Option<&DocumentAttributes> {
        match &self.kind {
            TypeKind::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Relationship fields, if this is a relationship type.
    pub fn relationship(&self) -> Option<&RelationshipAttributes> {
        match &self.kind {
            TypeKind::Relationship(rel) => Some(rel),
            _ => None,
        }
    }

    /// Whether `base_type_id` is set and agrees with the carried variant.
    pub fn has_consistent_base(&self) -> bool {
        self.base_type_id.is_some() && self.base_type_id == self.kind.base_type_id()
    }
}
