//! Fitted-model persistence.
//!
//! A [`FittedModel`] bundles the fitted TF-IDF vectorizer with the fitted
//! k-means model. It is an explicit value: constructed (or loaded) by the
//! caller, handed to the pipeline, and optionally saved after a run. There
//! is no ambient global model state anywhere in the crate.
//!
//! On disk the model is two opaque JSON blobs, one per component, so the
//! vectorizer and the cluster model can be versioned or swapped
//! independently. Blob paths are configuration, not part of the pipeline
//! contract.

use std::error::Error;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, instrument};

use crate::cluster::KMeansModel;
use crate::vectorize::TfidfVectorizer;

/// The fitted state of one pipeline run: vectorizer plus k-means model.
///
/// A freshly fitted model is returned by `Pipeline::cluster`; a loaded one
/// is passed to `Pipeline::cluster_with_model`. The two are never mixed
/// silently within a single run.
#[derive(Debug, Serialize, Deserialize)]
pub struct FittedModel {
    pub vectorizer: TfidfVectorizer,
    pub kmeans: KMeansModel,
}

impl FittedModel {
    /// Load both blobs from disk.
    #[instrument(level = "info", skip_all, fields(%vectorizer_path, %kmeans_path))]
    pub async fn load(vectorizer_path: &str, kmeans_path: &str) -> Result<Self, Box<dyn Error>> {
        let vectorizer_blob = fs::read_to_string(vectorizer_path).await?;
        let kmeans_blob = fs::read_to_string(kmeans_path).await?;
        let vectorizer: TfidfVectorizer = serde_json::from_str(&vectorizer_blob)?;
        let kmeans: KMeansModel = serde_json::from_str(&kmeans_blob)?;
        info!(
            vocabulary = vectorizer.vocabulary_len(),
            "Loaded fitted model"
        );
        Ok(Self { vectorizer, kmeans })
    }

    /// Write both blobs to disk.
    #[instrument(level = "info", skip_all, fields(%vectorizer_path, %kmeans_path))]
    pub async fn save(
        &self,
        vectorizer_path: &str,
        kmeans_path: &str,
    ) -> Result<(), Box<dyn Error>> {
        fs::write(vectorizer_path, serde_json::to_string(&self.vectorizer)?).await?;
        fs::write(kmeans_path, serde_json::to_string(&self.kmeans)?).await?;
        info!("Saved fitted model");
        Ok(())
    }
}
