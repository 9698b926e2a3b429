//! assetize CLI binary.
//!
//! - `run` migrates the configured issue thread
//! - `migrate` migrates a local document

use assetize::AssetizeConfig;
use assetize::observability::init_logging;
use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, migrate_document, run_issue};

    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs)?;

    let config = AssetizeConfig::load()?;

    match cli.command {
        Commands::Run => {
            run_issue(&config).await?;
        }

        Commands::Migrate {
            input,
            format,
            offline,
        } => {
            migrate_document(&config, &input, format, offline).await?;
        }
    }

    Ok(())
}
