//! Aggregated validation failure

use thiserror::Error;

use super::violation::{Violation, ViolationKind};

/// Rejection of a pending write.
///
/// Holds every offending field of the write, in changed-set order.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Validation error: {}", join_messages(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join(",\n")
}

impl ValidationError {
    /// Returns `None` when there is nothing to reject.
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Offending field names in order
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    pub fn has_kind(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }
}

/// Result type for change validation
pub type ValidationResult<T> = Result<T, ValidationError>;
