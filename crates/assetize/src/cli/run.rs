//! Issue thread migration command handler.

use assetize::{AssetizeConfig, AssetizeResult, IssueThread, build_pipeline, github_client};
use tracing::info;

/// Migrate the configured issue and replace its body with the rendered result.
pub async fn run_issue(config: &AssetizeConfig) -> AssetizeResult<()> {
    config.validate_source()?;

    let (client, token) = github_client(config)?;
    let pipeline = build_pipeline(config, Some(&client), Some(token))?;
    let thread = IssueThread::new(client, &config.source.repository, config.source.issue_number)?
        .with_dry_run(config.publish.dry_run);

    let comments = thread.comments().await?;
    info!(comments = comments.len(), "Loaded issue thread");

    let outcome = pipeline.run(&IssueThread::join_bodies(&comments)).await?;

    if config.publish.dry_run {
        println!("{}", outcome.rendered());
    } else {
        thread.replace_body(outcome.rendered()).await?;
        info!(issue = thread.number(), "Issue body replaced");
    }

    if config.source.delete_after {
        thread.delete_comments(&comments).await?;
    }

    Ok(())
}
