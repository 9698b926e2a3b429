//! assetize - move pasted attachments into a permanent home.
//!
//! GitHub issue comments often embed images uploaded as ephemeral
//! `user-attachments`. assetize finds those references, downloads each unique
//! file once, optionally converts and compresses it, and commits it to a
//! repository served through GitHub Pages under a content-addressed name.
//! Re-running is safe: files already published are found and reused.
//!
//! # Architecture
//!
//! - `assetize_error` - error types
//! - `assetize_core` - data model
//! - `assetize_text` - reference extraction and rendering
//! - `assetize_cache` - per-run fetch deduplication
//! - `assetize_media` - type detection, normalization, compression, naming
//! - `assetize_github` - GitHub REST access
//! - `assetize_storage` - object stores and the idempotent publisher
//! - `assetize_config` - layered configuration
//! - `assetize_pipeline` - the migration pipeline
//!
//! This crate re-exports them and wires a pipeline from configuration.
//!
//! # Example
//!
//! ```rust,no_run
//! use assetize::{AssetizeConfig, build_pipeline};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AssetizeConfig::load()?;
//! let pipeline = build_pipeline(&config, None, None)?;
//! let outcome = pipeline.run("![x](https://example.com/a.png)").await?;
//! println!("{}", outcome.rewritten());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
pub mod observability;

pub use app::{build_pipeline, github_client, object_store};
pub use assetize_cache::{FetchCache, FetchOutcome};
pub use assetize_config::{
    AssetizeConfig, DestinationConfig, GitHubConfig, MediaConfig, PublishConfig, SourceConfig,
};
pub use assetize_core::*;
pub use assetize_error::*;
pub use assetize_github::{GitHubClient, GitHubToken, IssueComment, IssueThread};
pub use assetize_media::{
    CompressionOutcome, CompressionParameter, CompressionSettings, Compressor, ContentNamer,
    FormatNormalizer, MediaProcessor, ResizeBounds, detect,
};
pub use assetize_pipeline::{Fetcher, HttpFetcher, MigrationOutcome, MigrationPipeline};
pub use assetize_storage::{
    DryRunStore, GitHubContentsStore, InMemoryObjectStore, LocalDirectoryStore, ObjectStore,
    Publisher, RepoMetadata, RetryPolicy, StoredObject,
};
pub use assetize_text::{ReferenceExtractor, render, rewrite};
