//! Embedded media references.

use serde::{Deserialize, Serialize};

/// A media citation found in free-form text.
///
/// Identity is the URL: two references with the same `url` share one fetch.
///
/// # Examples
///
/// ```
/// use assetize_core::Reference;
///
/// let reference = Reference::new("![x](https://example.com/a.png)", "https://example.com/a.png");
/// assert_eq!(reference.url, "https://example.com/a.png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// The full markup that embedded the media
    pub original_text: String,
    /// The `http(s)` URL of the media
    pub url: String,
}

impl Reference {
    /// Create a reference from its markup and URL.
    pub fn new(original_text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            url: url.into(),
        }
    }
}
