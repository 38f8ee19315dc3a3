//! Pre-persistence hook integration
//!
//! The persistence layer runs every registered before-validate hook on
//! each write. The no-update hook turns immutability violations into a
//! single aggregated [`ValidationError`].
//!
//! ```ignore
//! let mut store = MemoryStore::new();
//! noupdate::hook::install(Some(&mut store))?;
//! ```

mod errors;

pub use errors::SetupError;

use crate::enforcer::{EnforcerOptions, ImmutabilityEnforcer, RecordSnapshot, ValidationError};
use crate::observability::{log_event_with_fields, Event};
use crate::schema::ModelSchema;

/// Per-operation options passed to hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookOptions {
    /// Whether validation runs for this operation at all
    pub validate: bool,
}

impl Default for HookOptions {
    fn default() -> Self {
        Self { validate: true }
    }
}

impl HookOptions {
    /// Options for an operation that skips validation
    pub fn skip_validation() -> Self {
        Self { validate: false }
    }
}

/// A hook run before a write is validated and persisted.
pub trait BeforeValidateHook: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Rejects the write by returning `Err`.
    fn before_validate(
        &self,
        schema: &ModelSchema,
        snapshot: &RecordSnapshot,
        options: &HookOptions,
    ) -> Result<(), ValidationError>;
}

/// Persistence layer accepting before-validate hooks
pub trait HookHost {
    fn add_before_validate(&mut self, hook: Box<dyn BeforeValidateHook>);
}

/// Rejects writes that change no-update or read-only fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUpdateHook {
    enforcer: ImmutabilityEnforcer,
}

impl NoUpdateHook {
    pub fn new(options: EnforcerOptions) -> Self {
        Self {
            enforcer: ImmutabilityEnforcer::with_options(options),
        }
    }
}

impl BeforeValidateHook for NoUpdateHook {
    fn name(&self) -> &str {
        "noUpdate"
    }

    fn before_validate(
        &self,
        schema: &ModelSchema,
        snapshot: &RecordSnapshot,
        options: &HookOptions,
    ) -> Result<(), ValidationError> {
        if !options.validate {
            return Ok(());
        }

        self.enforcer.check(snapshot, schema).map_err(|err| {
            let fields = err.fields().join(",");
            log_event_with_fields(
                Event::UpdateRejected,
                &[
                    ("fields", fields.as_str()),
                    ("hook", self.name()),
                    ("model", schema.model.as_str()),
                ],
            );
            err
        })
    }
}

/// Registers the no-update hook with default options.
///
/// Returns the host so calls can be chained.
pub fn install<H>(host: Option<&mut H>) -> Result<&mut H, SetupError>
where
    H: HookHost + ?Sized,
{
    install_with(host, EnforcerOptions::default())
}

/// Registers the no-update hook.
///
/// Fails with [`SetupError::MissingHost`] before registering anything
/// when no host is given.
pub fn install_with<H>(host: Option<&mut H>, options: EnforcerOptions) -> Result<&mut H, SetupError>
where
    H: HookHost + ?Sized,
{
    let host = host.ok_or(SetupError::MissingHost)?;
    let hook = NoUpdateHook::new(options);
    let name = hook.name().to_string();
    host.add_before_validate(Box::new(hook));

    log_event_with_fields(Event::HookInstalled, &[("hook", name.as_str())]);
    Ok(host)
}
