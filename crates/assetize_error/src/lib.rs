//! Error types for the assetize workspace.
//!
//! This crate provides the error types shared by every stage of the
//! attachment migration pipeline.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Every error is `Clone`: a failed resolution is stored once in the fetch
//! cache and handed to every caller waiting on the same URL.
//!
//! # Examples
//!
//! ```
//! use assetize_error::{AssetizeResult, FetchError, FetchErrorKind};
//!
//! fn download() -> AssetizeResult<Vec<u8>> {
//!     Err(FetchError::new(FetchErrorKind::Status {
//!         url: "https://example.com/a.png".to_string(),
//!         status: 404,
//!     }))?
//! }
//!
//! assert!(download().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod fetch;
mod github;
mod media;
mod publish;
mod storage;

pub use config::ConfigError;
pub use error::{AssetizeError, AssetizeErrorKind, AssetizeResult};
pub use fetch::{FetchError, FetchErrorKind};
pub use github::{GitHubError, GitHubErrorKind};
pub use media::{MediaError, MediaErrorKind};
pub use publish::{PublishError, PublishErrorKind};
pub use storage::{StorageError, StorageErrorKind};
