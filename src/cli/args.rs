//! CLI argument definitions using clap
//!
//! Commands:
//! - noupdate check --model <name> [--snapshot <path>] [--config <path>]
//! - noupdate schema --model <name> [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// noupdate - field-level immutability checks for record updates
#[derive(Parser, Debug)]
#[command(name = "noupdate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a record snapshot against a model's declarations
    Check {
        /// Model name
        #[arg(long)]
        model: String,

        /// Snapshot JSON file; read from stdin when omitted
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Print the immutability declarations of a model
    Schema {
        /// Model name
        #[arg(long)]
        model: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
