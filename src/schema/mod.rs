//! Field declarations and the model schema registry
//!
//! Declarations are fixed at schema-definition time and never mutated
//! by validation.

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity};
pub use loader::SchemaLoader;
pub use types::{FieldDecl, FieldDeclarations, Immutability, ModelSchema};
