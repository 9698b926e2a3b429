//! GitHub REST access for assetize.
//!
//! Covers the handful of endpoints the migration needs: repository contents
//! and metadata for the destination store, and the comments and body of the
//! source issue.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod client;
mod issue;
mod models;

pub use auth::{DEFAULT_TOKEN_VAR, GitHubToken};
pub use client::{GITHUB_API_URL, GitHubClient};
pub use issue::{COMMENTS_PER_PAGE, IssueThread};
pub use models::{
    CommitIdentity, ContentEntry, IssueComment, IssueCommentBuilder, PutContentsRequest,
    PutContentsRequestBuilder, PutContentsResponse, RepositoryInfo, UpdateIssueBody,
    parse_repository,
};
