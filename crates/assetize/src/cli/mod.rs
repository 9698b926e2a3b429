//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the assetize binary.

mod commands;
mod migrate;
mod run;

pub use commands::{Cli, Commands, OutputFormat};
pub use migrate::migrate_document;
pub use run::run_issue;
