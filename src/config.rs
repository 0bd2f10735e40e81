//! Configuration resolution: YAML file plus CLI flags.
//!
//! The config file is optional and covers the same knobs as the CLI.
//! Precedence is CLI flag → config file → built-in default. Model blob
//! paths come in load/save pairs and each pair must be complete:
//! loading a vectorizer without its matching k-means model (or vice
//! versa) would mix fitted and fresh state within one run, which the
//! pipeline forbids.

use std::error::Error;
use std::time::Duration;

use serde::Deserialize;
use tokio::fs;
use tracing::{info, instrument};

use crate::cli::Cli;

/// Default cluster count when neither CLI nor config file sets one.
const DEFAULT_CLUSTERS: usize = 5;

/// Default per-request fetch timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The subset of settings a YAML config file may provide.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub clusters: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub json_output_dir: Option<String>,
    pub load_vectorizer: Option<String>,
    pub load_kmeans: Option<String>,
    pub save_vectorizer: Option<String>,
    pub save_kmeans: Option<String>,
}

/// Load and parse a YAML config file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn load_config(path: &str) -> Result<FileConfig, Box<dyn Error>> {
    let contents = fs::read_to_string(path).await?;
    let config: FileConfig = serde_yaml::from_str(&contents)?;
    info!("Loaded configuration file");
    Ok(config)
}

/// Fully resolved runtime settings.
#[derive(Debug)]
pub struct Settings {
    pub clusters: usize,
    pub timeout: Duration,
    pub json_output_dir: Option<String>,
    /// `(vectorizer_path, kmeans_path)` to load a fitted model from.
    pub load_models: Option<(String, String)>,
    /// `(vectorizer_path, kmeans_path)` to save the fitted model to.
    pub save_models: Option<(String, String)>,
}

impl Settings {
    /// Merge CLI arguments over the file config and apply defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when only one half of a model path pair is given,
    /// or when the cluster count resolves to zero.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, Box<dyn Error>> {
        let clusters = cli.clusters.or(file.clusters).unwrap_or(DEFAULT_CLUSTERS);
        if clusters == 0 {
            return Err("cluster count must be at least 1".into());
        }

        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let load_models = pair(
            cli.load_vectorizer.clone().or(file.load_vectorizer),
            cli.load_kmeans.clone().or(file.load_kmeans),
            "--load-vectorizer and --load-kmeans must be given together",
        )?;
        let save_models = pair(
            cli.save_vectorizer.clone().or(file.save_vectorizer),
            cli.save_kmeans.clone().or(file.save_kmeans),
            "--save-vectorizer and --save-kmeans must be given together",
        )?;

        Ok(Self {
            clusters,
            timeout: Duration::from_secs(timeout_secs),
            json_output_dir: cli.json_output_dir.clone().or(file.json_output_dir),
            load_models,
            save_models,
        })
    }
}

fn pair(
    first: Option<String>,
    second: Option<String>,
    message: &str,
) -> Result<Option<(String, String)>, Box<dyn Error>> {
    match (first, second) {
        (Some(a), Some(b)) => Ok(Some((a, b))),
        (None, None) => Ok(None),
        _ => Err(message.into()),
    }
}
