//! Tests for the idempotent publisher.

mod test_utils;

use assetize_core::{DestinationNamespace, FileType, Payload};
use assetize_error::{AssetizeErrorKind, PublishErrorKind};
use assetize_storage::{InMemoryObjectStore, Publisher, RetryPolicy};
use std::sync::Arc;
use test_utils::{FlakyStore, committer};

fn namespace() -> DestinationNamespace {
    DestinationNamespace::new("octo", "assets", "img")
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy::default()
        .with_initial_backoff_ms(1)
        .with_max_backoff_secs(1)
}

fn payload() -> Payload {
    Payload::new(b"not really a png".to_vec(), FileType::Png)
}

#[tokio::test]
async fn test_publish_creates_then_reuses() {
    let store = InMemoryObjectStore::new();
    let publisher = Publisher::new(Arc::new(store.clone()), namespace(), committer());

    let first = publisher
        .publish("img/abc.png", &payload(), "Add abc")
        .await
        .unwrap();
    assert!(!first.existed_before_run);
    assert_eq!(first.url, "https://octo.github.io/assets/img/abc.png");

    let second = publisher
        .publish("img/abc.png", &payload(), "Add abc")
        .await
        .unwrap();
    assert!(second.existed_before_run);
    assert_eq!(second.url, first.url);
    assert_eq!(store.put_count(), 1);
}

#[tokio::test]
async fn test_find_existing() {
    let store = InMemoryObjectStore::new();
    store.insert("img/old.jpg", vec![0xFF, 0xD8]).await;
    let publisher = Publisher::new(Arc::new(store), namespace(), committer());

    let found = publisher.find_existing("img/old.jpg").await.unwrap().unwrap();
    assert!(found.existed_before_run);
    assert_eq!(found.path, "img/old.jpg");
    assert!(publisher.find_existing("img/new.jpg").await.unwrap().is_none());
}

#[tokio::test]
async fn test_archived_destination_rejects_upload() {
    let store = InMemoryObjectStore::new().with_archived(true);
    let publisher = Publisher::new(Arc::new(store.clone()), namespace(), committer());

    let err = publisher
        .publish("img/abc.png", &payload(), "Add abc")
        .await
        .unwrap_err();

    match err.kind() {
        AssetizeErrorKind::Publish(e) => {
            assert!(
                matches!(&e.kind, PublishErrorKind::Archived { repository } if repository == "octo/assets")
            );
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(store.put_count(), 0);
}

#[tokio::test]
async fn test_archived_but_existing_object_is_reused() {
    let store = InMemoryObjectStore::new().with_archived(true);
    store.insert("img/abc.png", b"old".to_vec()).await;
    let publisher = Publisher::new(Arc::new(store), namespace(), committer());

    let published = publisher
        .publish("img/abc.png", &payload(), "Add abc")
        .await
        .unwrap();
    assert!(published.existed_before_run);
}

#[tokio::test]
async fn test_archival_checked_once() {
    let store = FlakyStore::failing(0);
    let publisher =
        Publisher::new(Arc::new(store.clone()), namespace(), committer()).with_retry(fast_retry());

    for path in ["img/a.png", "img/b.png", "img/c.png"] {
        publisher.publish(path, &payload(), "Add").await.unwrap();
    }

    assert_eq!(store.metadata_checks(), 1);
    assert_eq!(store.puts(), 3);
}

#[tokio::test]
async fn test_retries_exhausted_after_five_attempts() {
    let store = FlakyStore::failing(usize::MAX);
    let publisher =
        Publisher::new(Arc::new(store.clone()), namespace(), committer()).with_retry(fast_retry());

    let err = publisher
        .publish("img/abc.png", &payload(), "Add abc")
        .await
        .unwrap_err();

    assert_eq!(store.puts(), 5);
    match err.kind() {
        AssetizeErrorKind::Publish(e) => match &e.kind {
            PublishErrorKind::RetriesExhausted {
                path,
                attempts,
                last_error,
            } => {
                assert_eq!(path, "img/abc.png");
                assert_eq!(*attempts, 5);
                assert!(last_error.contains("attempt 5"));
            }
            other => panic!("unexpected publish error: {}", other),
        },
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_succeeds_after_transient_failures() {
    let store = FlakyStore::failing(2);
    let publisher =
        Publisher::new(Arc::new(store.clone()), namespace(), committer()).with_retry(fast_retry());

    let published = publisher
        .publish("img/abc.png", &payload(), "Add abc")
        .await
        .unwrap();

    assert!(!published.existed_before_run);
    assert_eq!(store.puts(), 3);
}

#[tokio::test]
async fn test_single_attempt_policy() {
    let store = FlakyStore::failing(1);
    let publisher = Publisher::new(Arc::new(store.clone()), namespace(), committer())
        .with_retry(fast_retry().with_max_attempts(1));

    assert!(
        publisher
            .publish("img/abc.png", &payload(), "Add abc")
            .await
            .is_err()
    );
    assert_eq!(store.puts(), 1);
}
