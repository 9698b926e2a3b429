//! Single-flight resolution cache keyed by URL.

use assetize_error::{AssetizeError, AssetizeResult};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, OnceCell};

type Slot<V> = Arc<OnceCell<AssetizeResult<V>>>;

/// Observed state of one cache entry.
#[derive(Debug, Clone)]
pub enum FetchOutcome<V> {
    /// A resolution has started and not finished yet
    Pending,
    /// The resolution succeeded
    Resolved(V),
    /// The resolution failed; every waiter receives this error
    Failed(AssetizeError),
}

impl<V> FetchOutcome<V> {
    /// Check whether the resolution has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        !matches!(self, FetchOutcome::Pending)
    }
}

/// Per-run map from URL to its single resolution.
///
/// The first [`resolve`](FetchCache::resolve) call for a URL runs its
/// initializer; concurrent and later calls for the same URL wait on that
/// run and receive a clone of its result. Failures are kept as well, so a
/// URL that failed once is never fetched again within the run.
///
/// # Examples
///
/// ```
/// use assetize_cache::FetchCache;
///
/// # #[tokio::main]
/// # async fn main() {
/// let cache: FetchCache<String> = FetchCache::new();
///
/// let first = cache
///     .resolve("https://example.com/a.png", || async { Ok("published".to_string()) })
///     .await
///     .unwrap();
/// let second = cache
///     .resolve("https://example.com/a.png", || async { Ok("never runs".to_string()) })
///     .await
///     .unwrap();
///
/// assert_eq!(first, second);
/// assert_eq!(cache.started(), 1);
/// # }
/// ```
#[derive(Debug)]
pub struct FetchCache<V> {
    entries: Mutex<HashMap<String, Slot<V>>>,
    started: AtomicUsize,
}

impl<V> FetchCache<V>
where
    V: Clone,
{
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            started: AtomicUsize::new(0),
        }
    }

    /// Resolve `url`, running `init` only if no resolution exists for it yet.
    #[tracing::instrument(skip(self, init))]
    pub async fn resolve<F, Fut>(&self, url: &str, init: F) -> AssetizeResult<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AssetizeResult<V>>,
    {
        let slot = {
            let mut entries = self.entries.lock().await;
            match entries.get(url) {
                Some(slot) => {
                    tracing::debug!("Joining existing resolution");
                    Arc::clone(slot)
                }
                None => {
                    let slot: Slot<V> = Arc::new(OnceCell::new());
                    entries.insert(url.to_string(), Arc::clone(&slot));
                    slot
                }
            }
        };

        slot.get_or_init(|| async {
            self.started.fetch_add(1, Ordering::SeqCst);
            tracing::debug!("Starting resolution");
            let result = init().await;
            if let Err(e) = &result {
                tracing::warn!(error = %e, "Resolution failed");
            }
            result
        })
        .await
        .clone()
    }

    /// Current state of the entry for `url`, if one was ever requested.
    pub async fn entry(&self, url: &str) -> Option<FetchOutcome<V>> {
        let entries = self.entries.lock().await;
        let slot = entries.get(url)?;
        let outcome = match slot.get() {
            None => FetchOutcome::Pending,
            Some(Ok(value)) => FetchOutcome::Resolved(value.clone()),
            Some(Err(e)) => FetchOutcome::Failed(e.clone()),
        };
        Some(outcome)
    }

    /// Number of initializers that have been started.
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of distinct URLs requested so far.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Check if no URL has been requested.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl<V> Default for FetchCache<V>
where
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
