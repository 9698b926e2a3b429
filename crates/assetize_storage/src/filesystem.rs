//! Local directory object store.
//!
//! Objects live at `{root}/{path}`. Writes go through a temp file and a
//! rename, so a crashed run never leaves a truncated object behind.

use crate::{ObjectStore, RepoMetadata, StoredObject};
use assetize_core::Committer;
use assetize_error::{AssetizeResult, StorageError, StorageErrorKind};
use std::path::{Component, Path, PathBuf};

/// Object store backed by a local directory.
#[derive(Debug, Clone)]
pub struct LocalDirectoryStore {
    root: PathBuf,
}

impl LocalDirectoryStore {
    /// Create a store rooted at `root`.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(root))]
    pub fn new(root: impl Into<PathBuf>) -> AssetizeResult<Self> {
        let root = root.into();

        std::fs::create_dir_all(&root).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                root.display(),
                e
            )))
        })?;

        tracing::info!(path = %root.display(), "Created local directory store");
        Ok(Self { root })
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an object path, rejecting anything that escapes the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if path.is_empty() || escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(
                path.to_string(),
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait::async_trait]
impl ObjectStore for LocalDirectoryStore {
    fn name(&self) -> &'static str {
        "local"
    }

    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    async fn get_object(&self, path: &str) -> AssetizeResult<Option<StoredObject>> {
        let full = self.resolve(path)?;

        match tokio::fs::metadata(&full).await {
            Ok(meta) if meta.is_file() => Ok(Some(StoredObject {
                size: meta.len(),
                ..StoredObject::at(path)
            })),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                full.display(),
                e
            )))
            .into()),
        }
    }

    #[tracing::instrument(skip(self, bytes, committer), fields(size = bytes.len()))]
    async fn put_object(
        &self,
        path: &str,
        bytes: &[u8],
        message: &str,
        committer: &Committer,
    ) -> AssetizeResult<StoredObject> {
        let full = self.resolve(path)?;

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let mut temp_name = full.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);
        tokio::fs::write(&temp_path, bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &full).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await {
                tracing::warn!(
                    path = %temp_path.display(),
                    error = %cleanup,
                    "Failed to remove temp file"
                );
            }
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                full.display(),
                e
            )))
            .into());
        }

        tracing::info!(
            path = %full.display(),
            size = bytes.len(),
            committer = %committer.name,
            "File written"
        );

        Ok(StoredObject {
            size: bytes.len() as u64,
            ..StoredObject::at(path)
        })
    }

    async fn repo_metadata(&self) -> AssetizeResult<RepoMetadata> {
        Ok(RepoMetadata::default())
    }
}
