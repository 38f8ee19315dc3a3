//! noupdate - field-level immutability enforcement for record updates
//!
//! Fields declared no-update may be set once and never changed after a
//! real value exists; read-only fields may never change once the record
//! exists.

pub mod cli;
pub mod config;
pub mod enforcer;
pub mod hook;
pub mod observability;
pub mod schema;
pub mod store;

pub use enforcer::{
    validate, EnforcerOptions, ImmutabilityEnforcer, RecordSnapshot, ValidationError, Violation,
    ViolationKind,
};
pub use hook::{install, HookOptions, SetupError};
pub use schema::{FieldDecl, Immutability, ModelSchema};
