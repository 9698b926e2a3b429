//! Dry-run store: read from the real destination, write locally.

use crate::{LocalDirectoryStore, ObjectStore, RepoMetadata, StoredObject};
use assetize_core::Committer;
use assetize_error::AssetizeResult;
use std::path::{Component, Path};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Link to `path` under a local `root`.
///
/// Relative roots are anchored at `./`; absolute roots are kept as they are.
///
/// # Examples
///
/// ```
/// use assetize_storage::local_link;
/// use std::path::Path;
///
/// assert_eq!(local_link(Path::new("."), "img/a.png"), "./img/a.png");
/// assert_eq!(local_link(Path::new("preview"), "img/a.png"), "./preview/img/a.png");
/// ```
pub fn local_link(root: &Path, path: &str) -> String {
    let display = root.display().to_string();
    let base = display.trim_end_matches('/');
    let anchored = matches!(
        root.components().next(),
        Some(Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_))
    );

    if base.is_empty() {
        format!("./{}", path)
    } else if anchored {
        format!("{}/{}", base, path)
    } else {
        format!("./{}/{}", base, path)
    }
}

/// Wraps a remote store so nothing is committed.
///
/// Lookups consult the remote first, then the local directory. Writes land in
/// the local directory and are linked relative to the working directory, so
/// a root of `.` yields `./{path}` and a root of `preview` yields
/// `./preview/{path}`. Absolute roots are linked as absolute paths.
#[derive(Clone)]
pub struct DryRunStore {
    remote: Arc<dyn ObjectStore>,
    local: LocalDirectoryStore,
}

impl DryRunStore {
    /// Create a dry-run wrapper around `remote`.
    pub fn new(remote: Arc<dyn ObjectStore>, local: LocalDirectoryStore) -> Self {
        Self { remote, local }
    }

    /// Local directory receiving the writes.
    pub fn local(&self) -> &LocalDirectoryStore {
        &self.local
    }

    /// Link to a locally written object.
    pub fn local_url(&self, path: &str) -> String {
        local_link(self.local.root(), path)
    }
}

impl std::fmt::Debug for DryRunStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DryRunStore")
            .field("remote", &self.remote.name())
            .field("local", &self.local)
            .finish()
    }
}

#[async_trait::async_trait]
impl ObjectStore for DryRunStore {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    #[instrument(skip(self))]
    async fn get_object(&self, path: &str) -> AssetizeResult<Option<StoredObject>> {
        if let Some(found) = self.remote.get_object(path).await? {
            return Ok(Some(found));
        }
        Ok(self.local.get_object(path).await?.map(|object| StoredObject {
            url: Some(self.local_url(path)),
            ..object
        }))
    }

    #[instrument(skip(self, bytes, committer), fields(size = bytes.len()))]
    async fn put_object(
        &self,
        path: &str,
        bytes: &[u8],
        message: &str,
        committer: &Committer,
    ) -> AssetizeResult<StoredObject> {
        debug!("Dry run, writing locally instead of committing");
        let object = self.local.put_object(path, bytes, message, committer).await?;
        Ok(StoredObject {
            url: Some(self.local_url(path)),
            ..object
        })
    }

    async fn repo_metadata(&self) -> AssetizeResult<RepoMetadata> {
        self.remote.repo_metadata().await
    }
}
