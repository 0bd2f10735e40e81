//! Text cleanup between extraction and vectorization.
//!
//! Extracted documents are lowercased, trimmed, and stripped of everything
//! that is not a letter, digit, or whitespace, leaving a token-friendly
//! string for the vectorizer.
//!
//! The batch operation is length-preserving: a document that cleans down
//! to nothing stays in the output as an empty string, so index `i` of the
//! cleaned sequence always corresponds to index `i` of the input (and thus
//! to the `i`-th surviving URL).

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s]").unwrap());

/// Clean a single document: lowercase, trim, drop non-alphanumeric
/// characters.
pub fn clean(document: &str) -> String {
    let lowered = document.to_lowercase();
    NON_ALPHANUMERIC.replace_all(&lowered, "").trim().to_string()
}

/// Clean a batch of documents, preserving length and order.
pub fn clean_all(documents: &[String]) -> Vec<String> {
    documents.iter().map(|d| clean(d)).collect()
}
