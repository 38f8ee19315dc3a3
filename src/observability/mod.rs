//! Observability for noupdate
//!
//! Structured JSON line logging of lifecycle and rejection events.
//! Observability is read-only and never affects validation results.
//!
//! ```ignore
//! use noupdate::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::UpdateRejected, &[("model", "users")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{LogTarget, Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
