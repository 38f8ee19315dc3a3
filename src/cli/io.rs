//! JSON I/O for the CLI
//!
//! - Input: one snapshot JSON document (file or stdin)
//! - Output: one JSON object per invocation on stdout

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};
use crate::enforcer::{RecordSnapshot, Violation};

/// Reads a snapshot from `path`, or from stdin when `None`.
pub fn read_snapshot(path: Option<&Path>) -> CliResult<RecordSnapshot> {
    let content = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().lock().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if content.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    Ok(serde_json::from_str(&content)?)
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_response_to(&mut io::stdout(), data)
}

/// Write a rejection listing every violation to stdout
pub fn write_rejection(violations: &[Violation]) -> CliResult<()> {
    write_rejection_to(&mut io::stdout(), violations)
}

pub(crate) fn write_response_to<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    write_json(writer, &json!({ "status": "ok", "data": data }))
}

pub(crate) fn write_rejection_to<W: Write>(writer: &mut W, violations: &[Violation]) -> CliResult<()> {
    write_json(writer, &rejection(violations))
}

pub(crate) fn rejection(violations: &[Violation]) -> Value {
    json!({
        "status": "rejected",
        "violations": violations,
    })
}

fn write_json<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
