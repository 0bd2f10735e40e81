//! Command-line interface definitions for News Clusters.
//!
//! This module defines the CLI arguments and options using the `clap`
//! crate. Values left unset here can come from the optional YAML config
//! file; see [`crate::config`] for the precedence rules.

use clap::Parser;

/// Command-line arguments for the News Clusters application.
///
/// # Examples
///
/// ```sh
/// # Cluster the URLs listed in links.txt into 5 groups
/// news_clusters -u links.txt
///
/// # Read URLs from stdin, ask for 3 clusters, write a JSON report
/// cat links.txt | news_clusters -u - -k 3 --json-output-dir ./reports
///
/// # Reuse a previously fitted model instead of refitting
/// news_clusters -u links.txt \
///     --load-vectorizer tfidf.json --load-kmeans kmeans.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// File containing article URLs, one per line ("-" reads stdin)
    #[arg(short, long)]
    pub urls_file: String,

    /// Number of clusters to partition the articles into
    #[arg(short = 'k', long)]
    pub clusters: Option<usize>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Per-request fetch timeout in seconds
    #[arg(long, env = "NEWS_CLUSTERS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Output directory for the JSON report (no JSON written when unset)
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Path to a fitted vectorizer blob to load (requires --load-kmeans)
    #[arg(long)]
    pub load_vectorizer: Option<String>,

    /// Path to a fitted k-means blob to load (requires --load-vectorizer)
    #[arg(long)]
    pub load_kmeans: Option<String>,

    /// Path to save the fitted vectorizer blob after the run
    #[arg(long)]
    pub save_vectorizer: Option<String>,

    /// Path to save the fitted k-means blob after the run
    #[arg(long)]
    pub save_kmeans: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(&[
            "news_clusters",
            "--urls-file",
            "./links.txt",
            "--clusters",
            "3",
        ]);

        assert_eq!(cli.urls_file, "./links.txt");
        assert_eq!(cli.clusters, Some(3));
        assert_eq!(cli.timeout_secs, None);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(&["news_clusters", "-u", "-", "-k", "7"]);

        assert_eq!(cli.urls_file, "-");
        assert_eq!(cli.clusters, Some(7));
    }

    #[test]
    fn test_cli_model_paths() {
        let cli = Cli::parse_from(&[
            "news_clusters",
            "-u",
            "links.txt",
            "--load-vectorizer",
            "tfidf.json",
            "--load-kmeans",
            "kmeans.json",
        ]);

        assert_eq!(cli.load_vectorizer.as_deref(), Some("tfidf.json"));
        assert_eq!(cli.load_kmeans.as_deref(), Some("kmeans.json"));
        assert!(cli.save_vectorizer.is_none());
    }
}
