//! Plain-text extraction from fetched HTML.
//!
//! There is exactly one extractor implementation, built on the `scraper`
//! crate. It walks the parsed document and collects every text node a
//! reader would see, skipping markup-only containers such as `<script>`
//! and `<style>`.

use scraper::Html;
use tracing::debug;

/// Elements whose text content is never reader-visible.
const SKIPPED_PARENTS: [&str; 6] = ["script", "style", "noscript", "template", "head", "title"];

/// Extract all human-visible text from an HTML document.
///
/// Markup is stripped and text nodes are joined with single spaces.
/// Empty or non-HTML input produces an empty string rather than an error;
/// a failed fetch upstream therefore flows through as an empty document.
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut content = String::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let visible = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|e| e.name()))
            .map(|name| !SKIPPED_PARENTS.contains(&name))
            .unwrap_or(true);
        if !visible {
            continue;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !content.is_empty() {
            content.push(' ');
        }
        content.push_str(trimmed);
    }

    debug!(bytes = content.len(), "Extracted page text");
    content
}
