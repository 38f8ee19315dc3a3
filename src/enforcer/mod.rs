//! Immutability enforcer
//!
//! Given a record's pending changes and per-field declarations, decides
//! which changes are forbidden.
//!
//! # Principles
//!
//! - Validation never mutates the snapshot or the declarations
//! - Validation is deterministic, violations follow changed-set order
//! - Every offending field is reported in one pass

mod errors;
mod rule;
mod snapshot;
mod violation;

pub use rule::{validate, EnforcerOptions, ImmutabilityEnforcer};
pub use errors::{ValidationError, ValidationResult};
pub use snapshot::{FieldChange, RecordSnapshot};
pub use violation::{Violation, ViolationKind};
