//! Configuration file
//!
//! ```json
//! { "schema_dir": "./schemas", "log_events": true, "treat_null_as_set": false }
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enforcer::EnforcerOptions;
use crate::observability::{log_event_with_fields, Logger, Event};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoUpdateConfig {
    /// Directory holding `model_<name>.json` schema files
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Emit structured log lines
    #[serde(default = "default_log_events")]
    pub log_events: bool,

    /// Block no-update changes when the prior value is an explicit null
    #[serde(default)]
    pub treat_null_as_set: bool,
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("./schemas")
}

fn default_log_events() -> bool {
    true
}

impl Default for NoUpdateConfig {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            log_events: default_log_events(),
            treat_null_as_set: false,
        }
    }
}

impl NoUpdateConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config: NoUpdateConfig = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Loads `path` if given, otherwise uses defaults.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.schema_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("schema_dir must not be empty".into()));
        }
        Ok(())
    }

    /// Applies logging settings process-wide.
    pub fn apply(&self) {
        Logger::set_enabled(self.log_events);
        let dir = self.schema_dir.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("schema_dir", dir.as_str())]);
    }

    pub fn enforcer_options(&self) -> EnforcerOptions {
        EnforcerOptions {
            treat_null_as_set: self.treat_null_as_set,
        }
    }
}
