//! Top-level error wrapper types.

use crate::{ConfigError, FetchError, GitHubError, MediaError, PublishError, StorageError};

/// Every failure the migration pipeline can report.
///
/// # Examples
///
/// ```
/// use assetize_error::{AssetizeError, ConfigError};
///
/// let err: AssetizeError = ConfigError::new("destination.owner is not set").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, Clone, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AssetizeErrorKind {
    /// Missing or invalid configuration
    #[from(ConfigError)]
    Config(ConfigError),
    /// Downloading a referenced file failed
    #[from(FetchError)]
    Fetch(FetchError),
    /// GitHub REST API failure
    #[from(GitHubError)]
    GitHub(GitHubError),
    /// Decoding or re-encoding a payload failed
    #[from(MediaError)]
    Media(MediaError),
    /// Publishing to the destination repository failed
    #[from(PublishError)]
    Publish(PublishError),
    /// Local or remote object storage failure
    #[from(StorageError)]
    Storage(StorageError),
}

/// Assetize error with kind discrimination.
///
/// # Examples
///
/// ```
/// use assetize_error::{AssetizeErrorKind, AssetizeResult, PublishError, PublishErrorKind};
///
/// fn upload() -> AssetizeResult<()> {
///     Err(PublishError::new(PublishErrorKind::Archived {
///         repository: "octo/assets".to_string(),
///     }))?
/// }
///
/// let err = upload().unwrap_err();
/// assert!(matches!(err.kind(), AssetizeErrorKind::Publish(_)));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Assetize Error: {}", _0)]
pub struct AssetizeError(Box<AssetizeErrorKind>);

impl AssetizeError {
    /// Create a new error from a kind.
    pub fn new(kind: AssetizeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AssetizeErrorKind {
        &self.0
    }
}

impl<T> From<T> for AssetizeError
where
    T: Into<AssetizeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for assetize operations.
pub type AssetizeResult<T> = std::result::Result<T, AssetizeError>;
