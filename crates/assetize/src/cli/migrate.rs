//! Local document migration command handler.

use super::OutputFormat;
use assetize::{
    AssetizeConfig, AssetizeResult, StorageError, StorageErrorKind, build_pipeline, github_client,
};
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::warn;

async fn read_input(input: &Path) -> AssetizeResult<String> {
    let read = if input == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .map(|_| text)
    } else {
        tokio::fs::read_to_string(input).await
    };

    read.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            input.display(),
            e
        )))
        .into()
    })
}

/// Migrate a document and print the requested output.
pub async fn migrate_document(
    config: &AssetizeConfig,
    input: &Path,
    format: OutputFormat,
    offline: bool,
) -> AssetizeResult<()> {
    let text = read_input(input).await?;

    let pipeline = if offline {
        build_pipeline(config, None, None)?
    } else {
        let (client, token) = github_client(config)?;
        build_pipeline(config, Some(&client), Some(token))?
    };

    let outcome = pipeline.run(&text).await?;
    if outcome.mappings().is_empty() {
        warn!("No references found");
    }

    match format {
        OutputFormat::Rendered => println!("{}", outcome.rendered()),
        OutputFormat::Rewritten => print!("{}", outcome.rewritten()),
    }
    Ok(())
}
