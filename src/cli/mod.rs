//! CLI module for noupdate
//!
//! Provides command-line interface for:
//! - check: validate a record snapshot against a model
//! - schema: show a model's immutability declarations

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, run_command, schema};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_snapshot, write_rejection, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command, cli.config.as_deref())
}
