//! The issue whose comments are migrated.

use crate::{GitHubClient, IssueComment, parse_repository};
use assetize_error::GitHubError;
use tracing::{info, instrument};

/// Comments requested per page.
pub const COMMENTS_PER_PAGE: u32 = 100;

/// Reads and updates one issue's comment thread.
#[derive(Debug, Clone)]
pub struct IssueThread {
    client: GitHubClient,
    owner: String,
    repo: String,
    number: u64,
    dry_run: bool,
}

impl IssueThread {
    /// Address issue `number` of the `owner/repo` repository.
    pub fn new(client: GitHubClient, repository: &str, number: u64) -> Result<Self, GitHubError> {
        let (owner, repo) = parse_repository(repository)?;
        Ok(Self {
            client,
            owner,
            repo,
            number,
            dry_run: false,
        })
    }

    /// In dry-run mode deletions are only logged.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// `owner/repo` of the issue.
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Issue number.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Browser link to a comment.
    pub fn comment_url(&self, comment: &IssueComment) -> String {
        format!(
            "https://github.com/{}/{}/issues/{}#issuecomment-{}",
            self.owner,
            self.repo,
            self.number,
            comment.id()
        )
    }

    /// Every comment, oldest first.
    ///
    /// Pages are requested until one comes back shorter than
    /// [`COMMENTS_PER_PAGE`].
    #[instrument(skip(self), fields(repository = %self.repository(), number = self.number))]
    pub async fn comments(&self) -> Result<Vec<IssueComment>, GitHubError> {
        let mut comments = Vec::new();
        let mut page = 1;

        loop {
            let batch = self
                .client
                .list_issue_comments(&self.owner, &self.repo, self.number, page, COMMENTS_PER_PAGE)
                .await?;
            let fetched = batch.len();
            comments.extend(batch);

            if fetched < COMMENTS_PER_PAGE as usize {
                break;
            }
            page += 1;
        }

        info!(count = comments.len(), pages = page, "Loaded issue comments");
        Ok(comments)
    }

    /// Bodies of `comments` joined with newlines.
    pub fn join_bodies(comments: &[IssueComment]) -> String {
        comments
            .iter()
            .map(|c| c.body().as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All comment bodies joined with newlines.
    pub async fn concatenated_body(&self) -> Result<String, GitHubError> {
        let comments = self.comments().await?;
        Ok(Self::join_bodies(&comments))
    }

    /// Replace the issue body.
    #[instrument(skip(self, body), fields(repository = %self.repository(), number = self.number))]
    pub async fn replace_body(&self, body: &str) -> Result<(), GitHubError> {
        self.client
            .update_issue_body(&self.owner, &self.repo, self.number, body)
            .await?;
        info!("Issue body replaced");
        Ok(())
    }

    /// Delete `comments`, or only log them in dry-run mode.
    #[instrument(skip(self, comments), fields(count = comments.len(), dry_run = self.dry_run))]
    pub async fn delete_comments(&self, comments: &[IssueComment]) -> Result<(), GitHubError> {
        for comment in comments {
            let url = self.comment_url(comment);
            if self.dry_run {
                info!(%url, "Comment was supposed to be deleted unless dry run was set");
                continue;
            }
            self.client
                .delete_comment(&self.owner, &self.repo, *comment.id())
                .await?;
            info!(%url, "Comment deleted");
        }
        Ok(())
    }
}
