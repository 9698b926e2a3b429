//! Publication results and replacement mappings.

use serde::{Deserialize, Serialize};

/// An object living in the destination namespace.
///
/// `path` is deterministic for a given source URL, which is what makes
/// re-running the migration idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublishedObject {
    /// Path inside the destination repository
    pub path: String,
    /// URL at which the object is served
    pub url: String,
    /// Whether the object was already present before this run
    pub existed_before_run: bool,
}

/// Maps one unique reference to its published location.
///
/// # Examples
///
/// ```
/// use assetize_core::ReplacementMapping;
///
/// let mapping = ReplacementMapping {
///     original_text: "![x](https://example.com/a.png)".to_string(),
///     original_url: "https://example.com/a.png".to_string(),
///     published_url: "https://octo.github.io/assets/img/abc.png".to_string(),
/// };
/// assert_eq!(
///     mapping.rewritten_text(),
///     "![x](https://octo.github.io/assets/img/abc.png)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplacementMapping {
    /// Markup the reference was found in
    pub original_text: String,
    /// Source URL
    pub original_url: String,
    /// Published URL
    pub published_url: String,
}

impl ReplacementMapping {
    /// The original markup with its URL pointing at the published location.
    pub fn rewritten_text(&self) -> String {
        self.original_text
            .replace(&self.original_url, &self.published_url)
    }
}
