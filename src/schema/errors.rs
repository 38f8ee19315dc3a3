//! Schema error types
//!
//! Error codes:
//! - NOUPDATE_UNKNOWN_SCHEMA (REJECT)
//! - NOUPDATE_SCHEMA_IMMUTABLE (REJECT)
//! - NOUPDATE_MALFORMED_SCHEMA (FATAL)

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller request rejected
    Reject,
    /// Schema set cannot be trusted, startup must abort
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Model not declared
    UnknownSchema,
    /// Attempt to redefine an existing model
    SchemaImmutable,
    /// Schema file unreadable or structurally invalid
    MalformedSchema,
}

impl SchemaErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::UnknownSchema => "NOUPDATE_UNKNOWN_SCHEMA",
            SchemaErrorCode::SchemaImmutable => "NOUPDATE_SCHEMA_IMMUTABLE",
            SchemaErrorCode::MalformedSchema => "NOUPDATE_MALFORMED_SCHEMA",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::MalformedSchema => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with context
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    model: Option<String>,
}

impl SchemaError {
    /// Create an unknown schema error
    pub fn unknown_schema(model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            code: SchemaErrorCode::UnknownSchema,
            message: format!("Model '{}' is not declared", model),
            model: Some(model),
        }
    }

    /// Create a schema immutable error
    pub fn schema_immutable(model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            code: SchemaErrorCode::SchemaImmutable,
            message: format!("Model '{}' is already declared", model),
            model: Some(model),
        }
    }

    /// Create an error for a malformed schema file
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::MalformedSchema,
            message: format!("Malformed schema file '{}': {}", path.into(), reason.into()),
            model: None,
        }
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the model name if applicable
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
