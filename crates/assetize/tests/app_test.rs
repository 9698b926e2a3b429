//! Tests for wiring a pipeline from configuration.

use assetize::observability::default_filter;
use assetize::{AssetizeConfig, AssetizeErrorKind, ObjectStore, build_pipeline, object_store};
use tempfile::TempDir;

fn offline_config(dir: &TempDir) -> AssetizeConfig {
    let mut config = AssetizeConfig::default();
    config.destination.owner = "octo".to_string();
    config.destination.repo = "assets".to_string();
    config.destination.directory = "img".to_string();
    config.publish.dry_run = true;
    config.publish.dry_run_directory = dir.path().display().to_string();
    config
}

#[tokio::test]
async fn test_offline_pipeline_passes_owned_references_through() {
    let dir = TempDir::new().unwrap();
    let pipeline = build_pipeline(&offline_config(&dir), None, None).unwrap();

    let text = "![x](https://octo.github.io/assets/img/abc.png)";
    let outcome = pipeline.run(text).await.unwrap();

    assert_eq!(outcome.rewritten(), text);
    assert_eq!(outcome.created(), 0);
    assert_eq!(pipeline.publisher().namespace().directory(), "img");
}

#[test]
fn test_offline_store_writes_locally() {
    let dir = TempDir::new().unwrap();
    let store = object_store(&offline_config(&dir), None).unwrap();

    assert_eq!(store.name(), "dry-run");
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut config = offline_config(&dir);
    config.destination.directory.clear();

    let err = build_pipeline(&config, None, None).unwrap_err();
    assert!(matches!(err.kind(), AssetizeErrorKind::Config(_)));
}

#[test]
fn test_default_log_filter() {
    assert_eq!(default_filter(false), "info");
    assert_eq!(default_filter(true), "info,assetize=debug");
}
