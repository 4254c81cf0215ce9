//! Codec and validation for CMIS type definitions.
//!
//! - [`types`]: the [`TypeDefinition`](types::TypeDefinition) record and its validator
//! - [`codec`]: XML and JSON encoding over caller-owned streams
//! - [`config`]: configuration file loading

pub mod codec;
pub mod config;
pub mod types;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
