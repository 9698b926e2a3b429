//! Token lookup.

use assetize_error::{GitHubError, GitHubErrorKind};

/// Default name of the environment variable holding the token.
pub const DEFAULT_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// A GitHub access token.
///
/// The token is never printed: `Debug` redacts it.
///
/// # Examples
///
/// ```
/// use assetize_github::GitHubToken;
///
/// let token = GitHubToken::new("ghp_secret");
/// assert_eq!(token.secret(), "ghp_secret");
/// assert!(!format!("{:?}", token).contains("ghp_secret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct GitHubToken(String);

impl GitHubToken {
    /// Wrap a token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Read the token from the environment variable named `var`.
    ///
    /// `var` itself is configurable so that a personal access token can be
    /// stored under any secret name.
    pub fn from_env(var: &str) -> Result<Self, GitHubError> {
        Self::from_lookup(var, |name| std::env::var(name).ok())
    }

    /// Read the token through an arbitrary lookup, used for tests and
    /// non-process environments.
    pub fn from_lookup<F>(var: &str, lookup: F) -> Result<Self, GitHubError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(var) {
            Some(token) if !token.trim().is_empty() => {
                tracing::debug!(var, "Loaded GitHub token");
                Ok(Self(token.trim().to_string()))
            }
            _ => Err(GitHubError::new(GitHubErrorKind::MissingToken(
                var.to_string(),
            ))),
        }
    }

    /// The raw token value.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for GitHubToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GitHubToken(***)")
    }
}
