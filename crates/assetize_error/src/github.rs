//! GitHub REST API error types.

/// GitHub-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GitHubErrorKind {
    /// No token found in the environment
    #[display("{} environment variable not set", _0)]
    MissingToken(String),
    /// Failed to build the HTTP client
    #[display("Failed to create GitHub client: {}", _0)]
    ClientCreation(String),
    /// The request could not be sent
    #[display("GitHub request failed: {}", _0)]
    Request(String),
    /// The API answered with a non-success status
    #[display("GitHub API returned HTTP {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// The response body did not match the expected shape
    #[display("Failed to parse GitHub response: {}", _0)]
    Parse(String),
    /// A repository slug was not of the form `owner/repo`
    #[display("Invalid repository '{}', expected owner/repo", _0)]
    InvalidRepository(String),
}

/// GitHub error with source location tracking.
///
/// # Examples
///
/// ```
/// use assetize_error::{GitHubError, GitHubErrorKind};
///
/// let err = GitHubError::new(GitHubErrorKind::MissingToken("GITHUB_TOKEN".to_string()));
/// assert!(format!("{}", err).contains("GITHUB_TOKEN"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("GitHub Error: {} at line {} in {}", kind, line, file)]
pub struct GitHubError {
    /// The kind of error that occurred
    pub kind: GitHubErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GitHubError {
    /// Create a new GitHubError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GitHubErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
