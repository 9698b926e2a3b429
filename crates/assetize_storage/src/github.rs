//! Destination repository backed by the GitHub contents API.

use crate::{ObjectStore, RepoMetadata, StoredObject};
use assetize_core::Committer;
use assetize_error::{AssetizeResult, GitHubError, GitHubErrorKind};
use assetize_github::{CommitIdentity, GitHubClient, PutContentsRequest};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, instrument, warn};

/// Object store writing files into a GitHub repository.
#[derive(Debug, Clone)]
pub struct GitHubContentsStore {
    client: GitHubClient,
    owner: String,
    repo: String,
}

impl GitHubContentsStore {
    /// Create a store for `owner/repo`.
    pub fn new(client: GitHubClient, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// `owner/repo` of the destination.
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[async_trait::async_trait]
impl ObjectStore for GitHubContentsStore {
    fn name(&self) -> &'static str {
        "github"
    }

    /// A failed lookup is logged and reported as absent; the upload that
    /// follows surfaces any real problem.
    #[instrument(skip(self), fields(repository = %self.repository()))]
    async fn get_object(&self, path: &str) -> AssetizeResult<Option<StoredObject>> {
        match self.client.get_contents(&self.owner, &self.repo, path).await {
            Ok(Some(entry)) => Ok(Some(StoredObject {
                path: entry.path().clone(),
                sha: Some(entry.sha().clone()),
                size: *entry.size(),
                url: None,
            })),
            Ok(None) => Ok(None),
            Err(e) => {
                warn!(error = %e, "Existence check failed, treating as not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, bytes, committer), fields(repository = %self.repository(), size = bytes.len()))]
    async fn put_object(
        &self,
        path: &str,
        bytes: &[u8],
        message: &str,
        committer: &Committer,
    ) -> AssetizeResult<StoredObject> {
        let identity = CommitIdentity {
            name: committer.name.clone(),
            email: committer.email.clone(),
        };
        let request = PutContentsRequest::builder()
            .message(message)
            .content(STANDARD.encode(bytes))
            .committer(identity.clone())
            .author(identity)
            .build()
            .map_err(|e| GitHubError::new(GitHubErrorKind::Request(e.to_string())))?;

        let entry = self
            .client
            .put_contents(&self.owner, &self.repo, path, &request)
            .await?;
        debug!(sha = %entry.sha(), "Object created");

        Ok(StoredObject {
            path: path.to_string(),
            sha: Some(entry.sha().clone()),
            size: bytes.len() as u64,
            url: None,
        })
    }

    #[instrument(skip(self), fields(repository = %self.repository()))]
    async fn repo_metadata(&self) -> AssetizeResult<RepoMetadata> {
        let info = self.client.get_repository(&self.owner, &self.repo).await?;
        Ok(RepoMetadata {
            archived: *info.archived(),
        })
    }
}
