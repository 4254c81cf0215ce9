//! Error types for type definition codecs and validation.

use serde::Serialize;
use thiserror::Error;

use crate::codec::WireFormat;

/// Errors raised while reading, writing, or validating type definitions.
#[derive(Debug, Error)]
pub enum TypeDefError {
    /// A required argument was missing.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Input bytes are not well-formed in the given format.
    #[error("malformed {format} input: {message}")]
    Format { format: WireFormat, message: String },

    /// Input is well-formed but does not describe a type definition
    /// (or a definition cannot be represented in the target format).
    #[error("not a type definition: {0}")]
    Schema(String),

    /// Reading from or writing to the stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TypeDefError {
    pub(crate) fn malformed(format: WireFormat, message: impl std::fmt::Display) -> Self {
        Self::Format { format, message: message.to_string() }
    }

    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }
}

/// A single violated rule: the offending attribute and a message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{attribute}: {message}")]
pub struct ValidationError {
    /// Protocol attribute name (e.g. `queryName`, `controllableACL`).
    pub attribute: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self { attribute: attribute.into(), message: message.into() }
    }
}
