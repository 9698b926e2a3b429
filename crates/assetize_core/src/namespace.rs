//! Destination namespace and commit identity.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Where migrated files are published.
///
/// The base URL defaults to the GitHub Pages site of the repository,
/// `https://{owner}.github.io/{repo}`.
///
/// # Examples
///
/// ```
/// use assetize_core::DestinationNamespace;
///
/// let ns = DestinationNamespace::new("octo", "assets", "img");
/// assert_eq!(ns.base_url(), "https://octo.github.io/assets");
/// assert_eq!(ns.object_url("img/abc.png"), "https://octo.github.io/assets/img/abc.png");
/// assert!(ns.owns("https://octo.github.io/assets/img/abc.png"));
/// assert!(!ns.owns("https://github.com/user-attachments/assets/1234"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct DestinationNamespace {
    /// Repository owner
    owner: String,
    /// Repository name
    repo: String,
    /// Public URL prefix, without trailing slash
    base_url: String,
    /// Directory inside the repository, without leading or trailing slash
    directory: String,
}

impl DestinationNamespace {
    /// Create a namespace served from the repository's GitHub Pages site.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        directory: impl AsRef<str>,
    ) -> Self {
        let owner = owner.into();
        let repo = repo.into();
        let base_url = format!("https://{}.github.io/{}", owner, repo);
        Self {
            owner,
            repo,
            base_url,
            directory: directory.as_ref().trim_matches('/').to_string(),
        }
    }

    /// Serve objects from a custom URL prefix instead of GitHub Pages.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim_end_matches('/').to_string();
        self
    }

    /// `owner/repo` slug.
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Public URL of an object path.
    pub fn object_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Whether `url` already points into this namespace.
    pub fn owns(&self, url: &str) -> bool {
        url.starts_with(&self.base_url)
    }

    /// Object path of a URL inside this namespace, if it is one.
    pub fn path_of(&self, url: &str) -> Option<String> {
        url.strip_prefix(&self.base_url)
            .map(|rest| rest.trim_start_matches('/').to_string())
    }
}

/// Identity recorded as committer and author of created objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Committer {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

impl Committer {
    /// Create a committer identity.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
