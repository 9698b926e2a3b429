//! Idempotent publishing into the destination namespace.

use crate::ObjectStore;
use assetize_core::{Committer, DestinationNamespace, Payload, PublishedObject};
use assetize_error::{AssetizeError, AssetizeResult, PublishError, PublishErrorKind};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, info, instrument, warn};

/// Attempt bound and backoff for uploads.
///
/// # Examples
///
/// ```
/// use assetize_storage::RetryPolicy;
///
/// let policy = RetryPolicy::default().with_initial_backoff_ms(10);
/// assert_eq!(*policy.max_attempts(), 5);
/// assert_eq!(policy.retries(), 4);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, first try included
    max_attempts: usize,
    /// Delay before the first retry
    initial_backoff_ms: u64,
    /// Upper bound on any single delay
    max_backoff_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_ms: 500,
            max_backoff_secs: 30,
        }
    }
}

impl RetryPolicy {
    /// Retries after the first attempt.
    pub fn retries(&self) -> usize {
        self.max_attempts.max(1) - 1
    }
}

/// Publishes payloads at deterministic paths, skipping ones already present.
pub struct Publisher {
    store: Arc<dyn ObjectStore>,
    namespace: DestinationNamespace,
    committer: Committer,
    retry: RetryPolicy,
    archival: OnceCell<AssetizeResult<()>>,
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("store", &self.store.name())
            .field("namespace", &self.namespace)
            .field("committer", &self.committer)
            .field("retry", &self.retry)
            .finish()
    }
}

impl Publisher {
    /// Create a publisher writing through `store`.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        namespace: DestinationNamespace,
        committer: Committer,
    ) -> Self {
        Self {
            store,
            namespace,
            committer,
            retry: RetryPolicy::default(),
            archival: OnceCell::new(),
        }
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Destination namespace.
    pub fn namespace(&self) -> &DestinationNamespace {
        &self.namespace
    }

    /// Retry policy in effect.
    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// The object already published at `path`, if any.
    #[instrument(skip(self), fields(store = self.store.name()))]
    pub async fn find_existing(&self, path: &str) -> AssetizeResult<Option<PublishedObject>> {
        Ok(self.store.get_object(path).await?.map(|stored| {
            debug!("Object already published");
            PublishedObject {
                path: path.to_string(),
                url: stored
                    .url
                    .unwrap_or_else(|| self.namespace.object_url(path)),
                existed_before_run: true,
            }
        }))
    }

    /// Publish `payload` at `path` unless something is already there.
    ///
    /// # Errors
    ///
    /// Returns [`PublishErrorKind::Archived`] if the destination repository is
    /// archived, and [`PublishErrorKind::RetriesExhausted`] once every upload
    /// attempt has failed.
    #[instrument(skip(self, payload, message), fields(store = self.store.name(), size = payload.len()))]
    pub async fn publish(
        &self,
        path: &str,
        payload: &Payload,
        message: &str,
    ) -> AssetizeResult<PublishedObject> {
        if let Some(existing) = self.find_existing(path).await? {
            return Ok(existing);
        }

        self.ensure_writable().await?;

        let attempt = AtomicUsize::new(0);
        let strategy = ExponentialBackoff::from_millis(self.retry.initial_backoff_ms)
            .factor(2)
            .max_delay(Duration::from_secs(self.retry.max_backoff_secs))
            .map(jitter)
            .take(self.retry.retries());

        let result = Retry::spawn(strategy, || {
            let n = attempt.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                match self
                    .store
                    .put_object(path, payload.bytes(), message, &self.committer)
                    .await
                {
                    Ok(stored) => Ok(stored),
                    Err(e) => {
                        warn!(attempt = n, max_attempts = self.retry.max_attempts, error = %e, "Upload failed");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                }
            }
        })
        .await;

        match result {
            Ok(stored) => {
                let url = stored
                    .url
                    .unwrap_or_else(|| self.namespace.object_url(path));
                info!(url = %url, attempts = attempt.load(Ordering::SeqCst), "Published");
                Ok(PublishedObject {
                    path: path.to_string(),
                    url,
                    existed_before_run: false,
                })
            }
            Err(e) => Err(PublishError::new(PublishErrorKind::RetriesExhausted {
                path: path.to_string(),
                attempts: attempt.load(Ordering::SeqCst),
                last_error: e.to_string(),
            })
            .into()),
        }
    }

    /// Fail if the destination is archived. Checked once per publisher.
    async fn ensure_writable(&self) -> AssetizeResult<()> {
        self.archival
            .get_or_init(|| async {
                let metadata = self.store.repo_metadata().await?;
                if metadata.archived {
                    warn!(repository = %self.namespace.repository(), "Destination is archived");
                    return Err(AssetizeError::from(PublishError::new(
                        PublishErrorKind::Archived {
                            repository: self.namespace.repository(),
                        },
                    )));
                }
                Ok(())
            })
            .await
            .clone()
    }
}
