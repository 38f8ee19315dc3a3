//! Store error types

use thiserror::Error;

use crate::enforcer::ValidationError;
use crate::schema::SchemaError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown model '{0}'")]
    UnknownModel(String),

    #[error("Record {id} not found in model '{model}'")]
    RecordNotFound { model: String, id: u64 },

    #[error("Field '{field}' is not declared on model '{model}'")]
    UnknownField { model: String, field: String },

    /// The `id` field mirrors the record id and is assigned by the store
    #[error("Field 'id' of record {id} in model '{model}' is assigned by the store")]
    RecordIdAssigned { model: String, id: u64 },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A before-validate hook rejected the write
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownModel(_) => "NOUPDATE_UNKNOWN_MODEL",
            Self::RecordNotFound { .. } => "NOUPDATE_RECORD_NOT_FOUND",
            Self::UnknownField { .. } => "NOUPDATE_UNKNOWN_FIELD",
            Self::RecordIdAssigned { .. } => "NOUPDATE_RECORD_ID_ASSIGNED",
            Self::Schema(err) => err.code().code(),
            Self::Validation(_) => "NOUPDATE_VALIDATION_FAILED",
        }
    }

    /// Returns the validation failure if a hook rejected the write
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}
