//! In-memory object store.

use crate::{ObjectStore, RepoMetadata, StoredObject};
use assetize_core::Committer;
use assetize_error::AssetizeResult;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Object store holding everything in a map.
///
/// Used by tests and offline runs. Clones share the same objects.
///
/// # Examples
///
/// ```
/// use assetize_core::Committer;
/// use assetize_storage::{InMemoryObjectStore, ObjectStore};
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = InMemoryObjectStore::new();
/// let committer = Committer::new("bot", "bot@example.com");
///
/// store.put_object("img/a.png", b"png", "Add a", &committer).await.unwrap();
/// assert!(store.get_object("img/a.png").await.unwrap().is_some());
/// assert_eq!(store.put_count(), 1);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    archived: bool,
    puts: Arc<AtomicUsize>,
    gets: Arc<AtomicUsize>,
}

impl InMemoryObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the repository as archived.
    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    /// Seed an object without counting it as a write.
    pub async fn insert(&self, path: impl Into<String>, bytes: Vec<u8>) {
        self.objects.lock().await.insert(path.into(), bytes);
    }

    /// Bytes stored at `path`.
    pub async fn bytes(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.lock().await.get(path).cloned()
    }

    /// Stored paths, sorted.
    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.objects.lock().await.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Number of `put_object` calls.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Number of `get_object` calls.
    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ObjectStore for InMemoryObjectStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get_object(&self, path: &str) -> AssetizeResult<Option<StoredObject>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.objects.lock().await.get(path).map(|bytes| StoredObject {
            size: bytes.len() as u64,
            ..StoredObject::at(path)
        }))
    }

    async fn put_object(
        &self,
        path: &str,
        bytes: &[u8],
        _message: &str,
        _committer: &Committer,
    ) -> AssetizeResult<StoredObject> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.objects
            .lock()
            .await
            .insert(path.to_string(), bytes.to_vec());
        Ok(StoredObject {
            size: bytes.len() as u64,
            ..StoredObject::at(path)
        })
    }

    async fn repo_metadata(&self) -> AssetizeResult<RepoMetadata> {
        Ok(RepoMetadata {
            archived: self.archived,
        })
    }
}
