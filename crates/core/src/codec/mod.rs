//! XML and JSON encoding of type definitions.
//!
//! Every function works on a caller-owned stream: writers flush what they
//! wrote and neither readers nor writers close the stream. Text is UTF-8.

pub mod json;
pub mod xml;

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{TypeDefError, TypeDefinition};

pub use json::{read_json, write_json, write_json_pretty};
pub use xml::{read_xml, write_xml};

/// Wire format of a serialized type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    Xml,
    Json,
}

impl WireFormat {
    /// Guess the format from a file extension (`.xml` / `.json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }

    /// The other format.
    pub fn opposite(self) -> Self {
        match self {
            Self::Xml => Self::Json,
            Self::Json => Self::Xml,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for WireFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xml => write!(f, "XML"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for WireFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown format: {}", s)),
        }
    }
}

/// Read a type definition in the given format.
pub fn read<R: Read>(format: WireFormat, input: R) -> Result<TypeDefinition, TypeDefError> {
    match format {
        WireFormat::Xml => read_xml(input),
        WireFormat::Json => read_json(input),
    }
}

/// Write a type definition in the given format.
///
/// `pretty` only affects JSON; XML is always indented.
pub fn write<W: Write>(
    format: WireFormat,
    type_def: &TypeDefinition,
    out: &mut W,
    pretty: bool,
) -> Result<(), TypeDefError> {
    match format {
        WireFormat::Xml => write_xml(type_def, out),
        WireFormat::Json if pretty => write_json_pretty(type_def, out),
        WireFormat::Json => write_json(type_def, out),
    }
}
