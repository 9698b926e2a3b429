//! Tests for the HTTP fetcher against a local server.

use assetize_error::{AssetizeErrorKind, FetchErrorKind};
use assetize_github::GitHubToken;
use assetize_pipeline::{Fetcher, HttpFetcher};
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use std::sync::{Arc, Mutex};

type Seen = Arc<Mutex<Vec<Option<String>>>>;

async fn file(State(seen): State<Seen>, headers: HeaderMap) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    seen.lock().unwrap().push(auth);
    b"bytes".to_vec()
}

async fn spawn_server() -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/file", get(file))
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), seen)
}

#[tokio::test]
async fn test_token_sent_to_trusted_host() {
    let (base, seen) = spawn_server().await;
    let fetcher = HttpFetcher::new(Some(GitHubToken::new("secret")))
        .unwrap()
        .with_token_host(&base);

    let bytes = fetcher.fetch(&format!("{}/file", base)).await.unwrap();

    assert_eq!(bytes, b"bytes");
    assert_eq!(seen.lock().unwrap()[0].as_deref(), Some("Bearer secret"));
}

#[tokio::test]
async fn test_token_withheld_from_other_hosts() {
    let (base, seen) = spawn_server().await;
    let fetcher = HttpFetcher::new(Some(GitHubToken::new("secret"))).unwrap();

    fetcher.fetch(&format!("{}/file", base)).await.unwrap();

    assert_eq!(seen.lock().unwrap()[0], None);
}

#[tokio::test]
async fn test_error_status_is_fatal() {
    let (base, _seen) = spawn_server().await;
    let fetcher = HttpFetcher::new(None).unwrap();

    let err = fetcher
        .fetch(&format!("{}/missing", base))
        .await
        .unwrap_err();

    match err.kind() {
        AssetizeErrorKind::Fetch(e) => {
            assert!(matches!(e.kind, FetchErrorKind::Status { status: 404, .. }))
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_token_host_matching() {
    let fetcher = HttpFetcher::new(Some(GitHubToken::new("secret"))).unwrap();

    assert!(fetcher.sends_token("https://github.com/user-attachments/assets/1234"));
    assert!(!fetcher.sends_token("https://github.com.evil.example/x.png"));
    assert!(!fetcher.sends_token("https://example.com/a.png"));
    assert!(!HttpFetcher::new(None).unwrap().sends_token("https://github.com/a.png"));
}
