//! Pipeline orchestration: URLs in, cluster assignments out.
//!
//! The pipeline is a linear state machine with no branching back:
//!
//! ```text
//! filter blanks → fetch+extract per URL → preprocess → vectorize → cluster
//! ```
//!
//! Each stage checks its own degenerate-input condition and, on hitting
//! one, short-circuits to the terminal empty result with exactly one
//! warning naming what went wrong. Individual fetch failures are warned
//! about per URL but never abort the run; the affected article simply
//! contributes an empty document.
//!
//! Fetches run strictly sequentially so that assignment `i` always
//! corresponds to the `i`-th surviving URL.

use futures::stream::{self, StreamExt};
use tracing::{info, instrument};

use crate::cluster;
use crate::diagnostics::{DiagnosticsSink, Severity};
use crate::extract;
use crate::fetch::FetchPage;
use crate::persist::FittedModel;
use crate::preprocess;
use crate::urls;
use crate::vectorize::TfidfVectorizer;

/// The result of one pipeline run.
///
/// On success `labels` holds one cluster id per entry of `survivors`, in
/// the order those URLs were encountered. On any degenerate condition
/// `labels` is empty; the reason has already been reported through the
/// diagnostics sink.
#[derive(Debug)]
pub struct ClusterOutcome {
    /// Input URLs that passed the blank filter, trimmed, in input order.
    pub survivors: Vec<String>,
    /// One cluster id in `[0, k)` per survivor; empty on failure.
    pub labels: Vec<usize>,
    /// The freshly fitted model, present only when this run fit one.
    pub model: Option<FittedModel>,
}

impl ClusterOutcome {
    fn empty(survivors: Vec<String>) -> Self {
        Self {
            survivors,
            labels: Vec::new(),
            model: None,
        }
    }

    /// True when the run ended in the terminal empty state.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Composes fetching, extraction, preprocessing, vectorization, and
/// clustering into a single `cluster(urls)` operation.
pub struct Pipeline<F> {
    fetcher: F,
    clusters: usize,
}

impl<F: FetchPage> Pipeline<F> {
    /// Build a pipeline around a fetcher and a configured cluster count.
    pub fn new(fetcher: F, clusters: usize) -> Self {
        Self { fetcher, clusters }
    }

    /// Run the full pipeline, fitting a fresh vectorizer and k-means model
    /// on this corpus.
    #[instrument(level = "info", skip_all, fields(urls = urls.len(), clusters = self.clusters))]
    pub async fn cluster(&self, urls: &[String], sink: &dyn DiagnosticsSink) -> ClusterOutcome {
        let survivors = surviving_urls(urls);
        if survivors.is_empty() {
            sink.report(Severity::Warning, "no non-blank URLs to cluster");
            return ClusterOutcome::empty(survivors);
        }
        info!(survivors = survivors.len(), "Filtered URL list");

        let documents = self.fetch_documents(&survivors, sink).await;
        let cleaned = preprocess::clean_all(&documents);

        let (vectorizer, matrix) = TfidfVectorizer::fit_transform(&cleaned);
        if matrix.ncols() == 0 {
            sink.report(
                Severity::Warning,
                "vectorization produced no features; nothing to cluster",
            );
            return ClusterOutcome::empty(survivors);
        }

        match cluster::fit_assignments(&matrix, self.clusters) {
            Some((kmeans, labels)) => {
                info!(
                    articles = survivors.len(),
                    clusters = self.clusters,
                    "Pipeline complete"
                );
                sink.report(
                    Severity::Info,
                    &format!(
                        "clustered {} articles into {} groups",
                        survivors.len(),
                        self.clusters
                    ),
                );
                ClusterOutcome {
                    survivors,
                    labels,
                    model: Some(FittedModel { vectorizer, kmeans }),
                }
            }
            None => {
                sink.report(
                    Severity::Warning,
                    &format!(
                        "clustering failed: cannot partition {} documents into {} clusters",
                        matrix.nrows(),
                        self.clusters
                    ),
                );
                ClusterOutcome::empty(survivors)
            }
        }
    }

    /// Run the pipeline against a previously fitted model, transforming
    /// and predicting instead of refitting.
    #[instrument(level = "info", skip_all, fields(urls = urls.len()))]
    pub async fn cluster_with_model(
        &self,
        urls: &[String],
        model: &FittedModel,
        sink: &dyn DiagnosticsSink,
    ) -> ClusterOutcome {
        let survivors = surviving_urls(urls);
        if survivors.is_empty() {
            sink.report(Severity::Warning, "no non-blank URLs to cluster");
            return ClusterOutcome::empty(survivors);
        }

        if model.vectorizer.vocabulary_len() == 0 {
            sink.report(
                Severity::Warning,
                "fitted vectorizer has an empty vocabulary; nothing to cluster",
            );
            return ClusterOutcome::empty(survivors);
        }

        let documents = self.fetch_documents(&survivors, sink).await;
        let cleaned = preprocess::clean_all(&documents);
        let matrix = model.vectorizer.transform(&cleaned);
        let labels = cluster::assignments(&model.kmeans, &matrix);

        ClusterOutcome {
            survivors,
            labels,
            model: None,
        }
    }

    /// Fetch and extract one document per URL, sequentially and in order.
    ///
    /// A failed fetch is reported through the sink and contributes an
    /// empty document; it is never dropped, so positional alignment with
    /// the survivor list holds.
    async fn fetch_documents(&self, urls: &[String], sink: &dyn DiagnosticsSink) -> Vec<String> {
        stream::iter(urls)
            .then(|raw| async move {
                let url = urls::normalize(raw);
                match self.fetcher.fetch(&url).await {
                    Ok(body) => extract::page_text(&body),
                    Err(e) => {
                        sink.report(Severity::Warning, &format!("failed to fetch {url}: {e}"));
                        String::new()
                    }
                }
            })
            .collect()
            .await
    }
}

/// Drop entries that are empty or whitespace-only after trimming.
fn surviving_urls(urls: &[String]) -> Vec<String> {
    urls.iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use std::collections::HashMap;
    use std::error::Error;

    /// Fetcher serving canned pages keyed by normalized URL; anything
    /// else fails as if the connection were refused.
    struct StubFetcher {
        pages: HashMap<String, String>,
    }

    impl StubFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, text)| {
                        (
                            url.to_string(),
                            format!("<html><body><p>{text}</p></body></html>"),
                        )
                    })
                    .collect(),
            }
        }
    }

    impl FetchPage for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
            match self.pages.get(url) {
                Some(body) => Ok(body.clone()),
                None => Err(format!("connection refused: {url}").into()),
            }
        }
    }

    fn urls_of(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|u| u.to_string()).collect()
    }

    #[tokio::test]
    async fn test_alignment_invariant() {
        let fetcher = StubFetcher::new(&[
            ("http://example.com/a", "gorilla tours rwanda kigali safari wildlife"),
            ("http://example.com/b", "kigali rwanda travel gorilla trekking"),
            ("http://example.com/c", "stock market earnings quarterly finance shares"),
        ]);
        let pipeline = Pipeline::new(fetcher, 2);
        let sink = MemorySink::new();

        let outcome = pipeline
            .cluster(&urls_of(&["http://example.com/a", "http://example.com/b", "http://example.com/c"]), &sink)
            .await;

        assert_eq!(outcome.survivors.len(), 3);
        assert_eq!(outcome.labels.len(), 3);
        assert!(outcome.labels.iter().all(|&l| l < 2));
        assert!(sink.warnings().is_empty());
        assert!(outcome.model.is_some());
    }

    #[tokio::test]
    async fn test_empty_input_is_one_warning() {
        let pipeline = Pipeline::new(StubFetcher::new(&[]), 2);
        let sink = MemorySink::new();

        let outcome = pipeline.cluster(&[], &sink).await;

        assert!(outcome.is_empty());
        assert!(outcome.survivors.is_empty());
        assert_eq!(sink.warnings().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_only_input_is_one_warning() {
        let pipeline = Pipeline::new(StubFetcher::new(&[]), 2);
        let sink = MemorySink::new();

        let outcome = pipeline.cluster(&urls_of(&["   ", ""]), &sink).await;

        assert!(outcome.is_empty());
        assert_eq!(sink.warnings().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_entries_are_filtered_before_fetching() {
        let fetcher = StubFetcher::new(&[
            ("http://example.com/a", "gorilla tours rwanda kigali safari wildlife"),
            ("http://example.com/b", "stock market earnings quarterly finance shares"),
        ]);
        let pipeline = Pipeline::new(fetcher, 2);
        let sink = MemorySink::new();

        let outcome = pipeline
            .cluster(&urls_of(&["", " http://example.com/a ", "   ", "http://example.com/b"]), &sink)
            .await;

        assert_eq!(
            outcome.survivors,
            vec!["http://example.com/a".to_string(), "http://example.com/b".to_string()]
        );
        assert_eq!(outcome.labels.len(), 2);
        assert!(sink.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_scheme_is_defaulted_before_fetching() {
        let fetcher = StubFetcher::new(&[
            ("http://example.com/a", "gorilla tours rwanda kigali safari wildlife"),
            ("http://example.com/b", "stock market earnings quarterly finance shares"),
        ]);
        let pipeline = Pipeline::new(fetcher, 2);
        let sink = MemorySink::new();

        let outcome = pipeline
            .cluster(&urls_of(&["example.com/a", "example.com/b"]), &sink)
            .await;

        assert_eq!(outcome.labels.len(), 2);
        assert!(sink.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_isolated() {
        // The middle URL is unreachable; it must still occupy a row.
        let fetcher = StubFetcher::new(&[
            ("http://example.com/a", "gorilla tours rwanda kigali safari wildlife"),
            ("http://example.com/c", "gorilla tours rwanda kigali safari trekking"),
        ]);
        let pipeline = Pipeline::new(fetcher, 2);
        let sink = MemorySink::new();

        let outcome = pipeline
            .cluster(
                &urls_of(&["http://example.com/a", "http://unreachable.example/x", "http://example.com/c"]),
                &sink,
            )
            .await;

        assert_eq!(outcome.labels.len(), 3);
        assert_eq!(outcome.labels[0], outcome.labels[2]);
        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("http://unreachable.example/x"));
    }

    #[tokio::test]
    async fn test_all_empty_content_short_circuits_with_one_warning() {
        let fetcher = StubFetcher::new(&[
            ("http://example.com/a", ""),
            ("http://example.com/b", ""),
        ]);
        let pipeline = Pipeline::new(fetcher, 2);
        let sink = MemorySink::new();

        let outcome = pipeline
            .cluster(&urls_of(&["example.com/a", "example.com/b"]), &sink)
            .await;

        assert!(outcome.is_empty());
        assert_eq!(outcome.survivors.len(), 2);
        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("no features"));
    }

    #[tokio::test]
    async fn test_more_clusters_than_documents_short_circuits() {
        let fetcher = StubFetcher::new(&[
            ("http://example.com/a", "gorilla tours rwanda kigali safari wildlife"),
            ("http://example.com/b", "kigali rwanda travel gorilla trekking"),
            ("http://example.com/c", "stock market earnings quarterly finance shares"),
        ]);
        let pipeline = Pipeline::new(fetcher, 10);
        let sink = MemorySink::new();

        let outcome = pipeline
            .cluster(&urls_of(&["http://example.com/a", "http://example.com/b", "http://example.com/c"]), &sink)
            .await;

        assert!(outcome.is_empty());
        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("10 clusters"));
    }

    #[tokio::test]
    async fn test_fitted_model_reuse_matches_fresh_fit() {
        let pages: &[(&str, &str)] = &[
            ("http://example.com/a", "gorilla tours rwanda kigali safari wildlife"),
            ("http://example.com/b", "kigali rwanda travel gorilla trekking"),
            ("http://example.com/c", "stock market earnings quarterly finance shares"),
            ("http://example.com/d", "quarterly finance report market shares earnings"),
        ];
        let url_list = urls_of(&[
            "http://example.com/a",
            "http://example.com/b",
            "http://example.com/c",
            "http://example.com/d",
        ]);
        let pipeline = Pipeline::new(StubFetcher::new(pages), 2);
        let sink = MemorySink::new();

        let fresh = pipeline.cluster(&url_list, &sink).await;
        let model = fresh.model.as_ref().expect("fresh run fits a model");

        let reused = pipeline.cluster_with_model(&url_list, model, &sink).await;

        assert_eq!(reused.labels, fresh.labels);
        assert!(reused.model.is_none());
        assert!(sink.warnings().is_empty());
    }
}
