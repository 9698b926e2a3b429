//! JSON models for the GitHub REST endpoints used by assetize.
//!
//! Only the fields the pipeline reads are modelled; everything else in the
//! responses is ignored.

use assetize_error::{GitHubError, GitHubErrorKind};
use serde::{Deserialize, Serialize};

/// Split an `owner/repo` slug.
///
/// # Examples
///
/// ```
/// use assetize_github::parse_repository;
///
/// assert_eq!(
///     parse_repository("octo/assets").unwrap(),
///     ("octo".to_string(), "assets".to_string())
/// );
/// assert!(parse_repository("octo").is_err());
/// assert!(parse_repository("octo/assets/extra").is_err());
/// ```
pub fn parse_repository(slug: &str) -> Result<(String, String), GitHubError> {
    let invalid = || GitHubError::new(GitHubErrorKind::InvalidRepository(slug.to_string()));

    let (owner, repo) = slug.trim().split_once('/').ok_or_else(invalid)?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return Err(invalid());
    }
    Ok((owner.to_string(), repo.to_string()))
}

/// A file entry returned by the contents API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, derive_getters::Getters)]
pub struct ContentEntry {
    /// Path inside the repository
    path: String,
    /// Blob SHA
    sha: String,
    /// File size in bytes
    #[serde(default)]
    size: u64,
    /// Raw download URL
    #[serde(default)]
    download_url: Option<String>,
    /// Base64 content, present on single-file GETs
    #[serde(default)]
    content: Option<String>,
}

/// Commit identity sent with content writes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitIdentity {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(
    Debug,
    Clone,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct PutContentsRequest {
    /// Commit message
    message: String,
    /// Base64-encoded file contents
    content: String,
    /// Committer identity
    committer: CommitIdentity,
    /// Author identity
    author: CommitIdentity,
    /// SHA of the blob being replaced, absent when creating
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    sha: Option<String>,
}

impl PutContentsRequest {
    /// Start building a request.
    pub fn builder() -> PutContentsRequestBuilder {
        PutContentsRequestBuilder::default()
    }
}

/// Response of a content write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, derive_getters::Getters)]
pub struct PutContentsResponse {
    /// The created or updated file
    content: ContentEntry,
}

/// Repository metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, derive_getters::Getters)]
pub struct RepositoryInfo {
    /// `owner/repo`
    full_name: String,
    /// Whether the repository is archived (read-only)
    #[serde(default)]
    archived: bool,
}

/// A comment on an issue.
#[derive(
    Debug,
    Clone,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct IssueComment {
    /// Comment ID
    id: u64,
    /// Markdown body; GitHub sends `null` for empty comments
    #[serde(default)]
    #[builder(default)]
    body: Option<String>,
    /// Link to the comment
    #[serde(default)]
    #[builder(default)]
    html_url: String,
}

impl IssueComment {
    /// Start building a comment.
    pub fn builder() -> IssueCommentBuilder {
        IssueCommentBuilder::default()
    }
}

/// Body of an issue update that only replaces the body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateIssueBody {
    /// New issue body
    pub body: String,
}
