//! Shared helpers for storage tests.

use assetize_core::Committer;
use assetize_error::{AssetizeResult, StorageError, StorageErrorKind};
use assetize_storage::{ObjectStore, RepoMetadata, StoredObject};
use std::sync::{Arc, Mutex};

pub fn committer() -> Committer {
    Committer::new("Asset Bot", "bot@example.com")
}

/// Store whose first `failures` uploads fail.
#[derive(Clone)]
pub struct FlakyStore {
    failures: usize,
    pub put_calls: Arc<Mutex<usize>>,
    pub metadata_calls: Arc<Mutex<usize>>,
    archived: bool,
}

impl FlakyStore {
    pub fn failing(failures: usize) -> Self {
        Self {
            failures,
            put_calls: Arc::new(Mutex::new(0)),
            metadata_calls: Arc::new(Mutex::new(0)),
            archived: false,
        }
    }

    pub fn archived() -> Self {
        Self {
            archived: true,
            ..Self::failing(0)
        }
    }

    pub fn puts(&self) -> usize {
        *self.put_calls.lock().unwrap()
    }

    pub fn metadata_checks(&self) -> usize {
        *self.metadata_calls.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl ObjectStore for FlakyStore {
    fn name(&self) -> &'static str {
        "flaky"
    }

    async fn get_object(&self, _path: &str) -> AssetizeResult<Option<StoredObject>> {
        Ok(None)
    }

    async fn put_object(
        &self,
        path: &str,
        bytes: &[u8],
        _message: &str,
        _committer: &Committer,
    ) -> AssetizeResult<StoredObject> {
        let call = {
            let mut calls = self.put_calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if call <= self.failures {
            Err(StorageError::new(StorageErrorKind::Unavailable(format!(
                "502 Bad Gateway on attempt {}",
                call
            ))))?
        }
        Ok(StoredObject {
            size: bytes.len() as u64,
            ..StoredObject::at(path)
        })
    }

    async fn repo_metadata(&self) -> AssetizeResult<RepoMetadata> {
        *self.metadata_calls.lock().unwrap() += 1;
        Ok(RepoMetadata {
            archived: self.archived,
        })
    }
}
