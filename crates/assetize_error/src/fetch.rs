//! Errors raised while downloading referenced files.

/// Kinds of fetch failures. None of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FetchErrorKind {
    /// The request could not be sent
    #[display("Request to {} failed: {}", url, message)]
    Request {
        /// URL being fetched
        url: String,
        /// Transport error message
        message: String,
    },
    /// The server answered with a non-success status
    #[display("Failed to fetch attached file {}: HTTP {}", url, status)]
    Status {
        /// URL being fetched
        url: String,
        /// HTTP status code
        status: u16,
    },
    /// The response body could not be read
    #[display("Failed to read body of {}: {}", url, message)]
    Body {
        /// URL being fetched
        url: String,
        /// Read error message
        message: String,
    },
}

/// Fetch error with location tracking.
///
/// # Examples
///
/// ```
/// use assetize_error::{FetchError, FetchErrorKind};
///
/// let err = FetchError::new(FetchErrorKind::Status {
///     url: "https://example.com/gone.png".to_string(),
///     status: 404,
/// });
/// assert!(format!("{}", err).contains("HTTP 404"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Fetch Error: {} at line {} in {}", kind, line, file)]
pub struct FetchError {
    /// The kind of error that occurred
    pub kind: FetchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl FetchError {
    /// Create a new fetch error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FetchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
