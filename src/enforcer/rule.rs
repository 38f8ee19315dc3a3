//! Immutability enforcement over a record's pending change set
//!
//! Rules, per changed field in recording order:
//! - undeclared or mutable: allowed
//! - read-only: always rejected once the record exists
//! - no-update: rejected only if a real prior value was persisted
//!
//! New records are never restricted.

use serde::{Deserialize, Serialize};

use super::errors::{ValidationError, ValidationResult};
use super::snapshot::{FieldChange, RecordSnapshot};
use super::violation::Violation;
use crate::schema::{FieldDeclarations, Immutability};

/// Tuning of the no-update rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnforcerOptions {
    /// Treat an explicitly persisted null as a set value.
    ///
    /// Off by default: null and never-set both allow the first assignment.
    #[serde(default)]
    pub treat_null_as_set: bool,
}

/// Decides which changes of a pending write are forbidden.
///
/// Stateless apart from its options; never mutates its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmutabilityEnforcer {
    options: EnforcerOptions,
}

impl ImmutabilityEnforcer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EnforcerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> EnforcerOptions {
        self.options
    }

    /// Returns every violation of the pending write, possibly none.
    pub fn validate<D>(&self, snapshot: &RecordSnapshot, declarations: &D) -> Vec<Violation>
    where
        D: FieldDeclarations + ?Sized,
    {
        if snapshot.is_new_record() || !snapshot.has_changes() {
            return Vec::new();
        }

        snapshot
            .changes()
            .iter()
            .filter_map(|change| self.check_change(change, declarations))
            .collect()
    }

    /// Like [`validate`](Self::validate), but fails with every violation
    /// aggregated into a single error.
    pub fn check<D>(&self, snapshot: &RecordSnapshot, declarations: &D) -> ValidationResult<()>
    where
        D: FieldDeclarations + ?Sized,
    {
        match ValidationError::from_violations(self.validate(snapshot, declarations)) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn check_change<D>(&self, change: &FieldChange, declarations: &D) -> Option<Violation>
    where
        D: FieldDeclarations + ?Sized,
    {
        match declarations.immutability(&change.field)? {
            Immutability::Mutable => None,
            Immutability::ReadOnly => Some(Violation::read_only(&change.field, change.value.clone())),
            Immutability::NoUpdate => {
                if self.was_set(change) {
                    Some(Violation::no_update(&change.field, change.value.clone()))
                } else {
                    None
                }
            }
        }
    }

    fn was_set(&self, change: &FieldChange) -> bool {
        if self.options.treat_null_as_set {
            change.previous.is_some()
        } else {
            change.had_value()
        }
    }
}

/// Validates with default options.
pub fn validate<D>(snapshot: &RecordSnapshot, declarations: &D) -> Vec<Violation>
where
    D: FieldDeclarations + ?Sized,
{
    ImmutabilityEnforcer::new().validate(snapshot, declarations)
}
