//! Publication errors.

/// Fatal publication conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PublishErrorKind {
    /// The destination repository is archived and cannot accept commits
    #[display("{} is archived", repository)]
    Archived {
        /// `owner/repo` of the destination
        repository: String,
    },
    /// Every upload attempt failed
    #[display(
        "Uploading {} failed after {} attempts, no more attempts will be made: {}",
        path,
        attempts,
        last_error
    )]
    RetriesExhausted {
        /// Object path that could not be written
        path: String,
        /// Number of attempts made
        attempts: usize,
        /// Message of the final failure
        last_error: String,
    },
}

/// Publish error with location tracking.
///
/// # Examples
///
/// ```
/// use assetize_error::{PublishError, PublishErrorKind};
///
/// let err = PublishError::new(PublishErrorKind::RetriesExhausted {
///     path: "assets/abc.png".to_string(),
///     attempts: 5,
///     last_error: "502 Bad Gateway".to_string(),
/// });
/// assert!(format!("{}", err).contains("after 5 attempts"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    /// The kind of error that occurred
    pub kind: PublishErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PublishError {
    /// Create a new publish error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
