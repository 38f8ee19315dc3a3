//! Immutability violations

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Kind of immutability violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Change rejected because a real prior value exists
    #[serde(rename = "noUpdate Violation")]
    NoUpdate,
    /// Change rejected unconditionally after creation
    #[serde(rename = "readOnly Violation")]
    ReadOnly,
}

impl ViolationKind {
    /// Error-kind tag reported to callers
    pub fn tag(&self) -> &'static str {
        match self {
            ViolationKind::NoUpdate => "noUpdate Violation",
            ViolationKind::ReadOnly => "readOnly Violation",
        }
    }

    /// Constraint name used in messages
    pub fn constraint(&self) -> &'static str {
        match self {
            ViolationKind::NoUpdate => "noUpdate",
            ViolationKind::ReadOnly => "noUpdate:readOnly",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One rejected field change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
    /// Attempted new value
    pub value: Value,
}

impl Violation {
    pub fn new(kind: ViolationKind, field: impl Into<String>, value: Value) -> Self {
        let field = field.into();
        Self {
            message: format!(
                "`{}` cannot be updated due `{}` constraint",
                field,
                kind.constraint()
            ),
            field,
            kind,
            value,
        }
    }

    pub fn no_update(field: impl Into<String>, value: Value) -> Self {
        Self::new(ViolationKind::NoUpdate, field, value)
    }

    pub fn read_only(field: impl Into<String>, value: Value) -> Self {
        Self::new(ViolationKind::ReadOnly, field, value)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
