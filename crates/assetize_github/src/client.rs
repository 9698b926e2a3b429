//! GitHub REST client.

use crate::{
    ContentEntry, GitHubToken, IssueComment, PutContentsRequest, PutContentsResponse,
    RepositoryInfo, UpdateIssueBody,
};
use assetize_error::{GitHubError, GitHubErrorKind};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

/// Public GitHub REST endpoint.
pub const GITHUB_API_URL: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("assetize/", env!("CARGO_PKG_VERSION"));

/// Minimal client for the endpoints assetize needs.
///
/// # Examples
///
/// ```
/// use assetize_github::{GitHubClient, GitHubToken};
///
/// let client = GitHubClient::new(GitHubToken::new("ghp_example"))
///     .unwrap()
///     .with_api_base("http://127.0.0.1:8080/");
/// assert_eq!(client.api_base(), "http://127.0.0.1:8080");
/// ```
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    token: GitHubToken,
    api_base: String,
}

impl GitHubClient {
    /// Create a client talking to `api.github.com`.
    pub fn new(token: GitHubToken) -> Result<Self, GitHubError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GitHubError::new(GitHubErrorKind::ClientCreation(e.to_string())))?;
        debug!("Creating new GitHub client");
        Ok(Self {
            client,
            token,
            api_base: GITHUB_API_URL.to_string(),
        })
    }

    /// Point the client at another API root, e.g. GitHub Enterprise.
    pub fn with_api_base(mut self, api_base: impl AsRef<str>) -> Self {
        self.api_base = api_base.as_ref().trim_end_matches('/').to_string();
        self
    }

    /// API root in use.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.api_base, endpoint))
            .bearer_auth(self.token.secret())
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, GitHubError> {
        let response = builder.send().await.map_err(|e| {
            error!(error = ?e, "Failed to send request to GitHub API");
            GitHubError::new(GitHubErrorKind::Request(e.to_string()))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, body = %body, "GitHub API returned error");
            return Err(GitHubError::new(GitHubErrorKind::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, GitHubError> {
        response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse GitHub response");
            GitHubError::new(GitHubErrorKind::Parse(e.to_string()))
        })
    }

    /// Fetch a file's metadata, or `None` when it does not exist.
    #[instrument(skip(self))]
    pub async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Option<ContentEntry>, GitHubError> {
        let endpoint = format!("/repos/{}/{}/contents/{}", owner, repo, path);
        match self.send(self.request(Method::GET, &endpoint)).await {
            Ok(response) => Ok(Some(Self::parse(response).await?)),
            Err(e) if is_not_found(&e) => {
                debug!("File not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Create or update a file.
    #[instrument(skip(self, body), fields(message = %body.message()))]
    pub async fn put_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        body: &PutContentsRequest,
    ) -> Result<ContentEntry, GitHubError> {
        let endpoint = format!("/repos/{}/{}/contents/{}", owner, repo, path);
        let response = self
            .send(self.request(Method::PUT, &endpoint).json(body))
            .await?;
        let created: PutContentsResponse = Self::parse(response).await?;
        debug!(sha = %created.content().sha(), "File written");
        Ok(created.content().clone())
    }

    /// Repository metadata.
    #[instrument(skip(self))]
    pub async fn get_repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<RepositoryInfo, GitHubError> {
        let endpoint = format!("/repos/{}/{}", owner, repo);
        let response = self.send(self.request(Method::GET, &endpoint)).await?;
        Self::parse(response).await
    }

    /// One page of issue comments.
    #[instrument(skip(self))]
    pub async fn list_issue_comments(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<IssueComment>, GitHubError> {
        let endpoint = format!("/repos/{}/{}/issues/{}/comments", owner, repo, issue_number);
        let request = self
            .request(Method::GET, &endpoint)
            .query(&[("page", page), ("per_page", per_page)]);
        let response = self.send(request).await?;
        Self::parse(response).await
    }

    /// Replace an issue's body.
    #[instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn update_issue_body(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<(), GitHubError> {
        let endpoint = format!("/repos/{}/{}/issues/{}", owner, repo, issue_number);
        let update = UpdateIssueBody {
            body: body.to_string(),
        };
        self.send(self.request(Method::PATCH, &endpoint).json(&update))
            .await?;
        Ok(())
    }

    /// Delete an issue comment.
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
    ) -> Result<(), GitHubError> {
        let endpoint = format!("/repos/{}/{}/issues/comments/{}", owner, repo, comment_id);
        self.send(self.request(Method::DELETE, &endpoint)).await?;
        Ok(())
    }
}

fn is_not_found(error: &GitHubError) -> bool {
    matches!(
        &error.kind,
        GitHubErrorKind::Api { status, .. } if *status == StatusCode::NOT_FOUND.as_u16()
    )
}
