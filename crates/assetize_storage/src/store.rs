//! Object store trait definition.

use assetize_core::Committer;
use assetize_error::AssetizeResult;

/// An object present in a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Path inside the store
    pub path: String,
    /// Blob SHA, when the store tracks one
    pub sha: Option<String>,
    /// Size in bytes, when known
    pub size: u64,
    /// URL the object is served from, when the store decides it
    pub url: Option<String>,
}

impl StoredObject {
    /// An object at `path` with no extra metadata.
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sha: None,
            size: 0,
            url: None,
        }
    }
}

/// Repository-level facts about the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepoMetadata {
    /// An archived repository rejects every write
    pub archived: bool,
}

/// Trait for pluggable object storage backends.
///
/// Writes always create a new object; callers check existence first.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Look up the object at `path`.
    async fn get_object(&self, path: &str) -> AssetizeResult<Option<StoredObject>>;

    /// Create an object at `path`.
    async fn put_object(
        &self,
        path: &str,
        bytes: &[u8],
        message: &str,
        committer: &Committer,
    ) -> AssetizeResult<StoredObject>;

    /// Repository metadata of the destination.
    async fn repo_metadata(&self) -> AssetizeResult<RepoMetadata>;
}
