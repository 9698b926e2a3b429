//! Content-addressed object naming.

use assetize_core::FileType;
use sha2::{Digest, Sha256};

/// Number of hex characters of the URL hash kept in the file stem.
pub const STEM_LENGTH: usize = 32;

/// Derives stable object paths from source URLs.
///
/// The stem depends only on the URL, so the same reference always lands at
/// the same path. The extension follows the detected type.
///
/// # Examples
///
/// ```
/// use assetize_core::FileType;
/// use assetize_media::ContentNamer;
///
/// let namer = ContentNamer::new("img/");
/// let path = namer.path("https://example.com/a.png", FileType::Png);
///
/// assert!(path.starts_with("img/"));
/// assert!(path.ends_with(".png"));
/// assert_eq!(path.len(), "img/".len() + 32 + ".png".len());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentNamer {
    directory: String,
}

impl ContentNamer {
    /// Create a namer writing into `directory`.
    pub fn new(directory: impl AsRef<str>) -> Self {
        Self {
            directory: directory.as_ref().trim_matches('/').to_string(),
        }
    }

    /// Directory prefix of every path.
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// First [`STEM_LENGTH`] hex characters of SHA-256 over the URL.
    pub fn stem(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let mut hash = format!("{:x}", hasher.finalize());
        hash.truncate(STEM_LENGTH);
        hash
    }

    /// Object path for `url` published as `file_type`.
    pub fn path(&self, url: &str, file_type: FileType) -> String {
        let filename = format!("{}.{}", Self::stem(url), file_type.extension());
        if self.directory.is_empty() {
            filename
        } else {
            format!("{}/{}", self.directory, filename)
        }
    }
}
