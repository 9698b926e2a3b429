//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// assetize - migrate pasted attachments into a permanent repository
#[derive(Parser, Debug)]
#[command(name = "assetize")]
#[command(about = "Migrate pasted attachments into a permanent repository", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Migrate the configured issue thread and replace the issue body
    Run,

    /// Migrate a local document and print the result
    Migrate {
        /// Document to read, `-` for stdin
        #[arg(long, default_value = "-")]
        input: PathBuf,

        /// What to print
        #[arg(long, value_enum, default_value_t = OutputFormat::Rewritten)]
        format: OutputFormat,

        /// Do not contact GitHub; write every object locally
        #[arg(long)]
        offline: bool,
    },
}

/// Output of the `migrate` command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table of migrated files
    Rendered,
    /// Input document pointing at the published files
    Rewritten,
}
