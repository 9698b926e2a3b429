//! Wiring a pipeline from configuration.

use assetize_config::AssetizeConfig;
use assetize_error::AssetizeResult;
use assetize_github::{GitHubClient, GitHubToken};
use assetize_pipeline::{HttpFetcher, MigrationPipeline};
use assetize_storage::{
    DryRunStore, GitHubContentsStore, InMemoryObjectStore, LocalDirectoryStore, ObjectStore,
    Publisher,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Authenticated GitHub client for the configured API.
///
/// # Errors
///
/// Returns an error if the token variable is unset or empty.
#[instrument(skip(config), fields(token_var = %config.github.token_var))]
pub fn github_client(config: &AssetizeConfig) -> AssetizeResult<(GitHubClient, GitHubToken)> {
    let token = GitHubToken::from_env(&config.github.token_var)?;
    let client = GitHubClient::new(token.clone())?.with_api_base(&config.github.api_url);
    Ok((client, token))
}

/// Destination store for a run.
///
/// With a client, objects are committed to the destination repository, or
/// written locally on a dry run. Without one, the destination is assumed empty
/// and everything is written locally.
pub fn object_store(
    config: &AssetizeConfig,
    client: Option<&GitHubClient>,
) -> AssetizeResult<Arc<dyn ObjectStore>> {
    let destination = &config.destination;
    let remote: Arc<dyn ObjectStore> = match client {
        Some(client) => Arc::new(GitHubContentsStore::new(
            client.clone(),
            destination.owner.clone(),
            destination.repo.clone(),
        )),
        None => Arc::new(InMemoryObjectStore::new()),
    };

    if config.publish.dry_run || client.is_none() {
        let local = LocalDirectoryStore::new(&config.publish.dry_run_directory)?;
        info!(directory = %local.root().display(), "Writing objects locally");
        return Ok(Arc::new(DryRunStore::new(remote, local)));
    }
    Ok(remote)
}

/// Build a validated pipeline.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a client cannot be built.
#[instrument(skip_all, fields(dry_run = config.publish.dry_run, offline = client.is_none()))]
pub fn build_pipeline(
    config: &AssetizeConfig,
    client: Option<&GitHubClient>,
    token: Option<GitHubToken>,
) -> AssetizeResult<MigrationPipeline> {
    config.validate()?;

    let publisher = Publisher::new(
        object_store(config, client)?,
        config.namespace(),
        config.committer(),
    )
    .with_retry(config.retry());
    let fetcher = HttpFetcher::new(token)?;

    Ok(MigrationPipeline::new(
        Arc::new(fetcher),
        config.processor(),
        publisher,
    ))
}
