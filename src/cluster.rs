//! K-means cluster assignment over the feature matrix.
//!
//! Fitting uses `linfa-clustering` with a fixed initialization seed, so
//! repeated runs on identical input produce the identical partition.
//!
//! The assigner is deliberately incapable of failing the pipeline:
//! requesting more clusters than there are rows, an empty feature space,
//! or a numerical failure inside the fit all degrade to `None`, which the
//! orchestrator reports as a warning and an empty assignment sequence.

use linfa::DatasetBase;
use linfa::dataset::AsTargets;
use linfa::traits::{Fit, Predict};
use linfa_clustering::KMeans;
use linfa_nn::distance::L2Dist;
use ndarray::Array2;
use rand_xoshiro::Xoshiro256Plus;
use rand_xoshiro::rand_core::SeedableRng;
use tracing::{debug, warn};

/// Fixed seed for centroid initialization. Identical corpora must map to
/// identical partitions across runs.
const KMEANS_SEED: u64 = 42;

/// Iteration cap for the relocation loop.
const MAX_ITERATIONS: u64 = 300;

/// The fitted k-means model type used throughout the crate.
pub type KMeansModel = KMeans<f64, L2Dist>;

/// Partition the matrix rows into `clusters` groups.
///
/// Returns the fitted model together with one label per row, each in
/// `[0, clusters)`. Returns `None` without panicking when the matrix is
/// too small to partition (fewer rows or columns than `clusters`,
/// including the zero-row/zero-column cases, or `clusters == 0`) or when
/// the fit itself fails.
pub fn fit_assignments(matrix: &Array2<f64>, clusters: usize) -> Option<(KMeansModel, Vec<usize>)> {
    if clusters == 0 || matrix.nrows() < clusters || matrix.ncols() < clusters {
        warn!(
            rows = matrix.nrows(),
            columns = matrix.ncols(),
            clusters,
            "Matrix too small to partition"
        );
        return None;
    }

    let dataset = DatasetBase::from(matrix.clone());
    let rng = Xoshiro256Plus::seed_from_u64(KMEANS_SEED);
    let model = match KMeans::params_with_rng(clusters, rng)
        .max_n_iterations(MAX_ITERATIONS)
        .tolerance(1e-4)
        .fit(&dataset)
    {
        Ok(model) => model,
        Err(e) => {
            warn!(error = ?e, clusters, "k-means fit failed");
            return None;
        }
    };

    let labels = assignments(&model, matrix);
    debug!(rows = matrix.nrows(), clusters, "Fitted k-means partition");
    Some((model, labels))
}

/// Assign each matrix row to its nearest fitted centroid.
pub fn assignments(model: &KMeansModel, matrix: &Array2<f64>) -> Vec<usize> {
    let dataset = DatasetBase::from(matrix.clone());
    let predictions = model.predict(&dataset);
    predictions.as_targets().iter().copied().collect()
}
