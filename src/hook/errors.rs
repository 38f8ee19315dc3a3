//! Hook setup errors

use thiserror::Error;

/// Misconfiguration detected while installing the hook.
///
/// Raised before anything is registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("The required host instance option is missing")]
    MissingHost,
}

impl SetupError {
    pub fn code(&self) -> &'static str {
        match self {
            SetupError::MissingHost => "NOUPDATE_MISSING_HOST",
        }
    }
}
