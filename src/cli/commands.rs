//! CLI command implementations

use std::io::{self, Write};
use std::path::Path;

use serde_json::{json, Value};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_snapshot, write_rejection_to, write_response_to};
use crate::config::NoUpdateConfig;
use crate::enforcer::{ImmutabilityEnforcer, RecordSnapshot, Violation};
use crate::observability::Logger;
use crate::schema::SchemaLoader;

/// Run a parsed command
pub fn run_command(command: Command, config_path: Option<&Path>) -> CliResult<()> {
    // Stdout carries exactly one JSON document per invocation.
    Logger::set_stderr_only(true);
    let config = NoUpdateConfig::load_or_default(config_path)?;
    config.apply();

    match command {
        Command::Check { model, snapshot } => check(&config, &model, snapshot.as_deref()),
        Command::Schema { model } => schema(&config, &model),
    }
}

/// Validates a snapshot and reports every violation.
///
/// Exits with an error when the snapshot is rejected.
pub fn check(config: &NoUpdateConfig, model: &str, snapshot_path: Option<&Path>) -> CliResult<()> {
    check_to(&mut io::stdout(), config, model, snapshot_path)
}

/// Prints the restricted fields of a model.
pub fn schema(config: &NoUpdateConfig, model: &str) -> CliResult<()> {
    write_response_to(&mut io::stdout(), describe_model(config, model)?)
}

pub(crate) fn check_to<W: Write>(
    out: &mut W,
    config: &NoUpdateConfig,
    model: &str,
    snapshot_path: Option<&Path>,
) -> CliResult<()> {
    let snapshot = read_snapshot(snapshot_path)?;
    let violations = check_snapshot(config, model, &snapshot)?;

    if violations.is_empty() {
        return write_response_to(out, json!({ "model": model, "violations": [] }));
    }

    write_rejection_to(out, &violations)?;
    Err(CliError::rejected(violations.len()))
}

pub(crate) fn check_snapshot(
    config: &NoUpdateConfig,
    model: &str,
    snapshot: &RecordSnapshot,
) -> CliResult<Vec<Violation>> {
    let loader = load_schemas(config)?;
    let schema = loader.require(model)?;
    let enforcer = ImmutabilityEnforcer::with_options(config.enforcer_options());
    Ok(enforcer.validate(snapshot, schema))
}

pub(crate) fn describe_model(config: &NoUpdateConfig, model: &str) -> CliResult<Value> {
    let loader = load_schemas(config)?;
    let schema = loader.require(model)?;

    let restricted: serde_json::Map<String, Value> = schema
        .restricted_fields()
        .into_iter()
        .map(|(name, mode)| (name.to_string(), Value::from(mode.as_str())))
        .collect();

    Ok(json!({
        "model": schema.model,
        "field_count": schema.fields.len(),
        "restricted": restricted,
    }))
}

fn load_schemas(config: &NoUpdateConfig) -> CliResult<SchemaLoader> {
    let mut loader = SchemaLoader::new(&config.schema_dir);
    loader.load_all()?;
    Ok(loader)
}
