//! Shared helpers for pipeline tests.

use assetize_core::{Committer, DestinationNamespace};
use assetize_error::{AssetizeResult, FetchError, FetchErrorKind, StorageError, StorageErrorKind};
use assetize_media::MediaProcessor;
use assetize_pipeline::{Fetcher, MigrationPipeline};
use assetize_storage::{ObjectStore, Publisher, RepoMetadata, RetryPolicy, StoredObject};
use image::{DynamicImage, ImageFormat, RgbImage};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

pub fn namespace() -> DestinationNamespace {
    DestinationNamespace::new("octo", "assets", "img")
}

pub fn committer() -> Committer {
    Committer::new("Asset Bot", "bot@example.com")
}

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::default()
        .with_initial_backoff_ms(1)
        .with_max_backoff_secs(1)
}

pub fn pipeline(
    fetcher: &MockFetcher,
    store: Arc<dyn ObjectStore>,
    processor: MediaProcessor,
) -> MigrationPipeline {
    let publisher = Publisher::new(store, namespace(), committer()).with_retry(fast_retry());
    MigrationPipeline::new(Arc::new(fetcher.clone()), processor, publisher)
}

pub fn encode(format: ImageFormat) -> Vec<u8> {
    let image = RgbImage::from_fn(8, 8, |x, y| image::Rgb([x as u8 * 30, y as u8 * 30, 90]));
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut bytes, format)
        .unwrap();
    bytes.into_inner()
}

/// Fetcher serving canned bodies and counting calls per URL.
#[derive(Clone, Default)]
pub struct MockFetcher {
    bodies: HashMap<String, Vec<u8>>,
    pub call_count: Arc<Mutex<usize>>,
    pub calls_by_url: Arc<Mutex<HashMap<String, usize>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: &str, body: Vec<u8>) -> Self {
        self.bodies.insert(url.to_string(), body);
        self
    }

    pub fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls_by_url
            .lock()
            .unwrap()
            .get(url)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> AssetizeResult<Vec<u8>> {
        *self.call_count.lock().unwrap() += 1;
        *self
            .calls_by_url
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default() += 1;

        // Let concurrent resolutions interleave.
        tokio::task::yield_now().await;

        match self.bodies.get(url) {
            Some(body) => Ok(body.clone()),
            None => Err(FetchError::new(FetchErrorKind::Status {
                url: url.to_string(),
                status: 404,
            })
            .into()),
        }
    }
}

/// Store whose uploads always fail.
#[derive(Clone, Default)]
pub struct BrokenStore {
    pub put_calls: Arc<Mutex<usize>>,
}

impl BrokenStore {
    pub fn puts(&self) -> usize {
        *self.put_calls.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl ObjectStore for BrokenStore {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn get_object(&self, _path: &str) -> AssetizeResult<Option<StoredObject>> {
        Ok(None)
    }

    async fn put_object(
        &self,
        _path: &str,
        _bytes: &[u8],
        _message: &str,
        _committer: &Committer,
    ) -> AssetizeResult<StoredObject> {
        *self.put_calls.lock().unwrap() += 1;
        Err(StorageError::new(StorageErrorKind::Unavailable("502 Bad Gateway".to_string())).into())
    }

    async fn repo_metadata(&self) -> AssetizeResult<RepoMetadata> {
        Ok(RepoMetadata::default())
    }
}
