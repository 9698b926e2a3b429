//! Rendering of migration results.

use crate::ReferenceExtractor;
use assetize_core::ReplacementMapping;
use std::collections::HashMap;

/// Render one self-contained block per mapping.
///
/// Each block shows a preview, the original and new locations, and an embed
/// snippet ready to copy. Blocks are numbered from 1 in input order.
///
/// # Examples
///
/// ```
/// use assetize_core::ReplacementMapping;
/// use assetize_text::render;
///
/// let body = render(&[ReplacementMapping {
///     original_text: "![x](https://example.com/a.png)".to_string(),
///     original_url: "https://example.com/a.png".to_string(),
///     published_url: "https://octo.github.io/assets/img/abc.png".to_string(),
/// }]);
///
/// assert!(body.starts_with("| 🏷️ | 🔗 File 1 |"));
/// assert!(body.ends_with("```"));
/// ```
pub fn render(mappings: &[ReplacementMapping]) -> String {
    let mut content = String::new();

    for (index, mapping) in mappings.iter().enumerate() {
        let published = &mapping.published_url;
        content.push_str(&format!(
            "| 🏷️ | 🔗 File {number} |\n\
             | :---: | :---: |\n\
             | 📷 | ![]({published}) |\n\
             | 🕸️ | `{original}` |\n\
             | ✨ | `{published}` |\n\
             \n\
             ```\n\
             ![]({published})\n\
             ```\n\
             \n",
            number = index + 1,
            original = mapping.original_url,
        ));
    }

    content.trim().to_string()
}

/// Rewrite `text` so every reference with a mapping points at its published URL.
///
/// References are located with the same rules as extraction; markup that the
/// extractor skips (backticked, opted out) is left untouched.
///
/// # Examples
///
/// ```
/// use assetize_core::ReplacementMapping;
/// use assetize_text::rewrite;
///
/// let mappings = [ReplacementMapping {
///     original_text: "![x](https://example.com/a.png)".to_string(),
///     original_url: "https://example.com/a.png".to_string(),
///     published_url: "https://octo.github.io/assets/img/abc.png".to_string(),
/// }];
///
/// assert_eq!(
///     rewrite("before ![x](https://example.com/a.png) after", &mappings),
///     "before ![x](https://octo.github.io/assets/img/abc.png) after"
/// );
/// ```
pub fn rewrite(text: &str, mappings: &[ReplacementMapping]) -> String {
    let published: HashMap<&str, &str> = mappings
        .iter()
        .map(|m| (m.original_url.as_str(), m.published_url.as_str()))
        .collect();

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;

    for found in ReferenceExtractor::new().matches(text) {
        let Some(new_url) = published.get(found.reference.url.as_str()) else {
            continue;
        };
        output.push_str(&text[cursor..found.range.start]);
        output.push_str(&found.reference.original_text.replace(&found.reference.url, new_url));
        cursor = found.range.end;
    }

    output.push_str(&text[cursor..]);
    output
}
