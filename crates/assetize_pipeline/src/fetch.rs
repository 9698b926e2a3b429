//! Downloading referenced files.

use assetize_error::{AssetizeResult, FetchError, FetchErrorKind};
use assetize_github::GitHubToken;
use tracing::{debug, instrument};

/// Only URLs under this prefix receive the bearer token.
pub const TOKEN_HOST: &str = "https://github.com";

/// Source of referenced file bytes.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Download `url`.
    ///
    /// # Errors
    ///
    /// Any failure is fatal for the run; fetches are never retried.
    async fn fetch(&self, url: &str) -> AssetizeResult<Vec<u8>>;
}

/// HTTP fetcher backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    token: Option<GitHubToken>,
    token_host: String,
}

impl HttpFetcher {
    /// Create a fetcher, optionally holding a token for GitHub-hosted files.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: Option<GitHubToken>) -> AssetizeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("assetize/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                FetchError::new(FetchErrorKind::Request {
                    url: TOKEN_HOST.to_string(),
                    message: e.to_string(),
                })
            })?;
        Ok(Self {
            client,
            token,
            token_host: TOKEN_HOST.to_string(),
        })
    }

    /// Send the token to a different host prefix.
    pub fn with_token_host(mut self, token_host: impl AsRef<str>) -> Self {
        self.token_host = token_host.as_ref().trim_end_matches('/').to_string();
        self
    }

    /// Whether a request to `url` carries the token.
    pub fn sends_token(&self, url: &str) -> bool {
        self.token.is_some()
            && url
                .strip_prefix(&self.token_host)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> AssetizeResult<Vec<u8>> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token
            && self.sends_token(url)
        {
            request = request.bearer_auth(token.secret());
        }

        debug!("Downloading");
        let response = request.send().await.map_err(|e| {
            FetchError::new(FetchErrorKind::Request {
                url: url.to_string(),
                message: e.to_string(),
            })
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(FetchErrorKind::Status {
                url: url.to_string(),
                status: status.as_u16(),
            })
            .into());
        }

        let bytes = response.bytes().await.map_err(|e| {
            FetchError::new(FetchErrorKind::Body {
                url: url.to_string(),
                message: e.to_string(),
            })
        })?;
        debug!(size = bytes.len(), "Downloaded");
        Ok(bytes.to_vec())
    }
}
