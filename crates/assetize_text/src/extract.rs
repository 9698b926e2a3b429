//! Reference extraction from markdown/HTML text.

use assetize_core::Reference;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// Markdown image or HTML `<img>` tag carrying an `http(s)` URL.
///
/// `.` stops at line ends, so an `<img>` tag extends to the last `>` on its line.
const REFERENCE_PATTERN: &str =
    r#"!\[.*?\]\((https?://[^\s)]+)\)|<img.*?src="(https?://[^\s"]+)".*>"#;

static REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(REFERENCE_PATTERN).expect("Valid reference regex"));

/// Word that opts an `<img>` tag out of migration when it follows the `src` attribute.
const EXCLUDE_MARKER: &str = "exclude";

/// A reference together with the byte range of its markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch {
    /// Byte range of `reference.original_text` in the scanned text
    pub range: Range<usize>,
    /// The extracted reference
    pub reference: Reference,
}

/// Finds embedded media references in free-form text.
///
/// Two surface forms are recognised: `![alt](URL)` and `<img ... src="URL" ...>`.
/// A match that touches a backtick on either side is skipped, so inline code
/// such as `` `![x](https://example.com/a.png)` `` is left alone. Scanning
/// resumes one character after the start of a skipped match, so a live
/// reference swallowed by a rejected span is still found.
///
/// This is a textual heuristic. Only the adjacent character is inspected: in
/// `` `hello ![x](https://example.com/a.png) world` `` the reference is still
/// extracted even though it sits inside a code span.
///
/// # Examples
///
/// ```
/// use assetize_text::ReferenceExtractor;
///
/// let extractor = ReferenceExtractor::new();
/// let refs = extractor.extract("see ![shot](https://example.com/a.png) and `![x](https://example.com/b.png)`");
///
/// assert_eq!(refs.len(), 1);
/// assert_eq!(refs[0].url, "https://example.com/a.png");
/// assert_eq!(refs[0].original_text, "![shot](https://example.com/a.png)");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReferenceExtractor {
    pattern: &'static Regex,
}

impl ReferenceExtractor {
    /// Create an extractor over the shared compiled pattern.
    pub fn new() -> Self {
        Self {
            pattern: &*REFERENCE_REGEX,
        }
    }

    /// Extract references in document order, duplicates included.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn extract(&self, text: &str) -> Vec<Reference> {
        let references: Vec<Reference> = self
            .matches(text)
            .into_iter()
            .map(|m| m.reference)
            .collect();

        debug!(count = references.len(), "Extracted references");
        references
    }

    /// Extract references along with the position of their markup.
    pub fn matches(&self, text: &str) -> Vec<ReferenceMatch> {
        let mut matches = Vec::new();
        let mut from = 0;

        while let Some(captures) = self.pattern.captures_at(text, from) {
            let Some(whole) = captures.get(0) else {
                break;
            };

            match Self::accept(text, &captures) {
                Some(url) => {
                    matches.push(ReferenceMatch {
                        range: whole.range(),
                        reference: Reference::new(whole.as_str(), url),
                    });
                    from = whole.end();
                }
                None => {
                    // Retry inside the rejected span.
                    let step = text[whole.start()..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
                    from = whole.start() + step;
                }
            }

            if from >= text.len() {
                break;
            }
        }

        matches
    }

    /// URL of an accepted match, or `None` if the match is backticked or excluded.
    fn accept<'t>(text: &'t str, captures: &regex::Captures<'t>) -> Option<&'t str> {
        let whole = captures.get(0)?;

        if text[..whole.start()].ends_with('`') || text[whole.end()..].starts_with('`') {
            debug!(markup = whole.as_str(), "Skipping backticked reference");
            return None;
        }

        match (captures.get(1), captures.get(2)) {
            (Some(markdown), _) => Some(markdown.as_str()),
            (None, Some(html)) => {
                // Remainder of the line after the closing quote of `src`.
                let after_src = html.end() + 1;
                let line_end = text[after_src..]
                    .find('\n')
                    .map_or(text.len(), |offset| after_src + offset);
                if text[after_src..line_end].contains(EXCLUDE_MARKER) {
                    debug!(url = html.as_str(), "Skipping excluded image tag");
                    return None;
                }
                Some(html.as_str())
            }
            (None, None) => None,
        }
    }
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}
