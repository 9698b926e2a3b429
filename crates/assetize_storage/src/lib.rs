//! Object stores and idempotent publishing for assetize.
//!
//! Published objects live at deterministic paths, so a re-run finds what an
//! earlier run created and skips the upload. The [`ObjectStore`] trait keeps
//! the destination pluggable:
//!
//! - [`GitHubContentsStore`] commits through the GitHub contents API
//! - [`LocalDirectoryStore`] writes files under a local directory
//! - [`DryRunStore`] reads from a real destination but writes locally
//! - [`InMemoryObjectStore`] keeps everything in memory
//!
//! # Example
//!
//! ```rust
//! use assetize_core::{Committer, DestinationNamespace, FileType, Payload};
//! use assetize_storage::{InMemoryObjectStore, Publisher};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryObjectStore::new();
//! let publisher = Publisher::new(
//!     Arc::new(store.clone()),
//!     DestinationNamespace::new("octo", "assets", "img"),
//!     Committer::new("bot", "bot@example.com"),
//! );
//! let payload = Payload::new(vec![1, 2, 3], FileType::Png);
//!
//! let first = publisher.publish("img/a.png", &payload, "Add a").await?;
//! let second = publisher.publish("img/a.png", &payload, "Add a").await?;
//! assert!(!first.existed_before_run);
//! assert!(second.existed_before_run);
//! assert_eq!(store.put_count(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dry_run;
mod filesystem;
mod github;
mod memory;
mod publisher;
mod store;

pub use assetize_error::{StorageError, StorageErrorKind};
pub use dry_run::{DryRunStore, local_link};
pub use filesystem::LocalDirectoryStore;
pub use github::GitHubContentsStore;
pub use memory::InMemoryObjectStore;
pub use publisher::{Publisher, RetryPolicy};
pub use store::{ObjectStore, RepoMetadata, StoredObject};
