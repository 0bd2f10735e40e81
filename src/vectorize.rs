//! TF-IDF feature construction over the preprocessed corpus.
//!
//! The vocabulary is the set of distinct whitespace-delimited tokens
//! across all input texts, kept in sorted order so that repeated fits of
//! the same corpus assign identical column indices. Each matrix entry is
//! the raw term count scaled by a smoothed inverse document frequency,
//! and rows are L2-normalized.
//!
//! Degenerate corpora never raise: an empty input sequence or an empty
//! vocabulary produces a matrix with zero rows or zero columns, which the
//! orchestrator detects and short-circuits on.

use std::collections::{BTreeMap, HashMap};

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A fitted TF-IDF transform: vocabulary plus per-term idf weights.
///
/// Fitting is corpus-dependent, so a vectorizer is built fresh for each
/// pipeline run unless a previously fitted one is explicitly reused. The
/// whole struct serializes to a single opaque blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Vocabulary terms in column order (sorted).
    terms: Vec<String>,
    /// Term → column index.
    index: HashMap<String, usize>,
    /// Smoothed inverse document frequency per column.
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and idf weights from a corpus.
    ///
    /// An empty corpus (or one with no tokens at all) yields a vectorizer
    /// with an empty vocabulary rather than an error.
    pub fn fit(texts: &[String]) -> Self {
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for text in texts {
            let mut seen: Vec<&str> = text.split_whitespace().collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let corpus_size = texts.len() as f64;
        let mut terms = Vec::with_capacity(document_frequency.len());
        let mut index = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());

        for (column, (term, df)) in document_frequency.into_iter().enumerate() {
            terms.push(term.to_string());
            index.insert(term.to_string(), column);
            idf.push(((1.0 + corpus_size) / (1.0 + df as f64)).ln() + 1.0);
        }

        debug!(
            documents = texts.len(),
            vocabulary = terms.len(),
            "Fitted TF-IDF vectorizer"
        );
        Self { terms, index, idf }
    }

    /// Map texts onto the fitted vocabulary.
    ///
    /// Returns one row per text and one column per vocabulary term, rows
    /// L2-normalized. Terms outside the vocabulary are ignored. With an
    /// empty vocabulary the result has zero columns.
    pub fn transform(&self, texts: &[String]) -> Array2<f64> {
        let mut matrix = Array2::zeros((texts.len(), self.terms.len()));

        for (row, text) in texts.iter().enumerate() {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for token in text.split_whitespace() {
                *counts.entry(token).or_insert(0) += 1;
            }
            for (term, count) in counts {
                if let Some(&column) = self.index.get(term) {
                    matrix[[row, column]] = count as f64 * self.idf[column];
                }
            }

            let norm = matrix.row(row).iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                matrix.row_mut(row).mapv_inplace(|v| v / norm);
            }
        }

        matrix
    }

    /// Fit on a corpus and transform it in one step.
    pub fn fit_transform(texts: &[String]) -> (Self, Array2<f64>) {
        let vectorizer = Self::fit(texts);
        let matrix = vectorizer.transform(texts);
        (vectorizer, matrix)
    }

    /// Number of vocabulary terms.
    pub fn vocabulary_len(&self) -> usize {
        self.terms.len()
    }
}
