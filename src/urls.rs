//! URL normalization for raw user input.
//!
//! Input lists are pasted free text: entries arrive with stray whitespace
//! and frequently without a scheme. This module canonicalizes each entry
//! into something the fetcher can attempt, defaulting to `http` when no
//! scheme is present.
//!
//! Normalization never fails. An entry that cannot be parsed even after
//! scheme insertion is returned trimmed as-is; the fetcher is the one that
//! reports it as unreachable.

use tracing::debug;
use url::Url;

/// Canonicalize a raw URL string.
///
/// Trims surrounding whitespace, parses the result, and inserts an `http`
/// scheme when the input has none. The reassembled URL comes from
/// [`Url::to_string`], so host and path are in canonical form.
///
/// The operation is idempotent: feeding its own output back in produces
/// the same string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize("  example.com/a "), "http://example.com/a");
/// assert_eq!(normalize("https://example.com"), "https://example.com/");
/// ```
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match Url::parse(trimmed) {
        Ok(url) => url.to_string(),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            match Url::parse(&format!("http://{trimmed}")) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    debug!(url = trimmed, error = %e, "URL not parseable after scheme insertion");
                    trimmed.to_string()
                }
            }
        }
        Err(e) => {
            debug!(url = trimmed, error = %e, "URL not parseable; passing through");
            trimmed.to_string()
        }
    }
}
