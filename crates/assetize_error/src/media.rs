//! Image decoding and encoding errors.

/// Kinds of media processing failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MediaErrorKind {
    /// The payload claimed a format but could not be decoded
    #[display("Failed to decode {} image: {}", format, message)]
    Decode {
        /// Detected format
        format: String,
        /// Decoder message
        message: String,
    },
    /// Re-encoding failed
    #[display("Failed to encode {} image: {}", format, message)]
    Encode {
        /// Target format
        format: String,
        /// Encoder message
        message: String,
    },
    /// The blocking worker running the codec panicked or was cancelled
    #[display("Media worker failed: {}", _0)]
    Worker(String),
}

/// Media error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Media Error: {} at line {} in {}", kind, line, file)]
pub struct MediaError {
    /// The kind of error that occurred
    pub kind: MediaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MediaError {
    /// Create a new media error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MediaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
