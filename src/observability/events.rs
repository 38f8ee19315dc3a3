//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file loaded
    ConfigLoaded,
    /// Schema directory loaded
    SchemasLoaded,
    /// Immutability hook registered on a host
    HookInstalled,
    /// Update rejected by a before-validate hook
    UpdateRejected,
    /// Update passed every hook and was persisted
    UpdatePersisted,
    /// Record created
    RecordCreated,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::HookInstalled => "HOOK_INSTALLED",
            Event::UpdateRejected => "UPDATE_REJECTED",
            Event::UpdatePersisted => "UPDATE_PERSISTED",
            Event::RecordCreated => "RECORD_CREATED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::UpdateRejected => Severity::Warn,
            Event::UpdatePersisted | Event::RecordCreated => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
