//! Tests for body rendering and in-place rewriting.

use assetize_core::ReplacementMapping;
use assetize_text::{render, rewrite};

fn mapping(original_url: &str, published_url: &str) -> ReplacementMapping {
    ReplacementMapping {
        original_text: format!("![]({})", original_url),
        original_url: original_url.to_string(),
        published_url: published_url.to_string(),
    }
}

#[test]
fn test_render_single_block() {
    let body = render(&[mapping(
        "https://example.com/a.png",
        "https://octo.github.io/assets/img/abc.png",
    )]);

    let expected = "| 🏷️ | 🔗 File 1 |\n\
                    | :---: | :---: |\n\
                    | 📷 | ![](https://octo.github.io/assets/img/abc.png) |\n\
                    | 🕸️ | `https://example.com/a.png` |\n\
                    | ✨ | `https://octo.github.io/assets/img/abc.png` |\n\
                    \n\
                    ```\n\
                    ![](https://octo.github.io/assets/img/abc.png)\n\
                    ```";
    assert_eq!(body, expected);
}

#[test]
fn test_render_numbers_blocks_in_order() {
    let body = render(&[
        mapping("https://example.com/a.png", "https://cdn/a.png"),
        mapping("https://example.com/b.png", "https://cdn/b.png"),
    ]);

    let first = body.find("File 1").unwrap();
    let second = body.find("File 2").unwrap();
    assert!(first < second);
    assert!(body.contains("```\n\n| 🏷️ | 🔗 File 2 |"));
}

#[test]
fn test_render_empty() {
    assert_eq!(render(&[]), "");
}

#[test]
fn test_rewrite_replaces_every_occurrence() {
    let text = "one ![a](https://example.com/a.png)\n\
                two <img src=\"https://example.com/a.png\" width=\"10\">\n\
                three `![a](https://example.com/a.png)`";
    let rewritten = rewrite(
        text,
        &[mapping("https://example.com/a.png", "https://cdn/a.png")],
    );

    assert_eq!(
        rewritten,
        "one ![a](https://cdn/a.png)\n\
         two <img src=\"https://cdn/a.png\" width=\"10\">\n\
         three `![a](https://example.com/a.png)`"
    );
}

#[test]
fn test_rewrite_leaves_unmapped_references() {
    let text = "![a](https://example.com/a.png) ![b](https://example.com/b.png)";
    let rewritten = rewrite(
        text,
        &[mapping("https://example.com/b.png", "https://cdn/b.png")],
    );

    assert_eq!(
        rewritten,
        "![a](https://example.com/a.png) ![b](https://cdn/b.png)"
    );
}

#[test]
fn test_rewrite_keeps_backticked_example_and_rewrites_live_reference() {
    let text = "Use `![alt]` syntax: ![shot](https://example.com/a.png)";
    let rewritten = rewrite(
        text,
        &[mapping("https://example.com/a.png", "https://cdn/a.png")],
    );

    assert_eq!(rewritten, "Use `![alt]` syntax: ![shot](https://cdn/a.png)");
}
