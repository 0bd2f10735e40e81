//! # News Clusters
//!
//! A clustering pipeline that groups news articles by content similarity.
//! Given a list of article URLs, it fetches each page, extracts the
//! readable text, builds TF-IDF feature vectors over the corpus, and
//! partitions the articles into `k` clusters with k-means.
//!
//! ## Features
//!
//! - Normalizes pasted URLs (whitespace, missing schemes) before fetching
//! - Isolates fetch failures: an unreachable article becomes an empty
//!   document and a warning, never an aborted run
//! - Deterministic clustering: identical input produces identical groups
//! - Optional persistence of the fitted vectorizer and k-means model as
//!   two opaque JSON blobs, reloadable on a later run
//! - Renders cluster groupings as Markdown, with an optional JSON report
//!
//! ## Usage
//!
//! ```sh
//! news_clusters -u links.txt -k 5 --json-output-dir ./reports
//! ```
//!
//! ## Architecture
//!
//! The application is a linear pipeline:
//! 1. **Filter**: drop blank input lines
//! 2. **Fetch + Extract**: download each article and strip its markup
//! 3. **Preprocess**: lowercase and remove non-alphanumeric characters
//! 4. **Vectorize**: fit a TF-IDF transform over the corpus
//! 5. **Cluster**: assign each article to one of `k` k-means groups
//!
//! Every failure inside the pipeline degrades to a warning and, at worst,
//! an empty cluster list; the process only errors out on CLI-level I/O.

use clap::Parser;
use std::error::Error;
use tracing::{error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod cluster;
mod config;
mod diagnostics;
mod extract;
mod fetch;
mod models;
mod outputs;
mod persist;
mod pipeline;
mod preprocess;
mod urls;
mod utils;
mod vectorize;

use cli::Cli;
use config::{FileConfig, Settings};
use diagnostics::TracingSink;
use fetch::HttpFetcher;
use models::ClusterReport;
use outputs::{json, markdown};
use persist::FittedModel;
use pipeline::Pipeline;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_clusters starting up");

    // Parse CLI and resolve configuration
    let args = Cli::parse();
    let file_config = match &args.config {
        Some(path) => config::load_config(path).await?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&args, file_config)?;
    info!(
        clusters = settings.clusters,
        timeout_secs = settings.timeout.as_secs(),
        "Resolved settings"
    );

    // Early check: ensure JSON output dir is writable
    if let Some(dir) = &settings.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Read the URL list ----
    let raw_urls = read_url_lines(&args.urls_file).await?;
    info!(count = raw_urls.len(), "Read URL list");

    // ---- Run the pipeline ----
    let fetcher = HttpFetcher::new(settings.timeout)?;
    let pipeline = Pipeline::new(fetcher, settings.clusters);
    let sink = TracingSink;

    let outcome = if let Some((vectorizer_path, kmeans_path)) = &settings.load_models {
        let model = FittedModel::load(vectorizer_path, kmeans_path).await?;
        pipeline.cluster_with_model(&raw_urls, &model, &sink).await
    } else {
        pipeline.cluster(&raw_urls, &sink).await
    };

    if outcome.is_empty() {
        warn!("Pipeline produced no clusters");
        println!("No clusters produced.");
        return Ok(());
    }

    // ---- Render results ----
    let report = ClusterReport::from_assignments(&outcome.survivors, &outcome.labels);
    println!("{}", markdown::report_to_markdown(&report));

    if let Some(dir) = &settings.json_output_dir {
        if let Err(e) = json::write_report(&report, dir).await {
            error!(error = %e, "Failed to write JSON report");
        }
    }

    // ---- Persist the fitted model ----
    if let Some((vectorizer_path, kmeans_path)) = &settings.save_models {
        match &outcome.model {
            Some(model) => model.save(vectorizer_path, kmeans_path).await?,
            None => warn!("No freshly fitted model to save (ran with a loaded model)"),
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        articles = report.article_count,
        clusters = report.groups.len(),
        "Execution complete"
    );

    Ok(())
}

/// Read the newline-separated URL list from a file, or stdin for `-`.
async fn read_url_lines(path: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let contents = if path == "-" {
        use tokio::io::AsyncReadExt;
        let mut buffer = String::new();
        tokio::io::stdin().read_to_string(&mut buffer).await?;
        buffer
    } else {
        tokio::fs::read_to_string(path).await?
    };
    Ok(contents.lines().map(str::to_string).collect())
}
