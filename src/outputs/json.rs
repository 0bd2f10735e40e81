//! JSON report output.
//!
//! Serializes a [`ClusterReport`] into a date-based directory structure so
//! repeated runs on the same day sit side by side, distinguished by their
//! run time.

use crate::models::ClusterReport;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`ClusterReport`] to `{json_output_dir}/{date}/clusters_{HHMMSS}.json`.
///
/// Creates the dated directory as needed.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(
    report: &ClusterReport,
    json_output_dir: &str,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string(report)?;

    let dated_dir = format!("{}/{}", json_output_dir, report.local_date);
    if let Err(e) = fs::create_dir_all(&dated_dir).await {
        error!(%dated_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let filename = format!(
        "{}/clusters_{}.json",
        dated_dir,
        report.local_time.replace(':', "")
    );
    info!(path = %filename, "Writing JSON report");
    fs::write(&filename, json).await?;
    info!(path = %filename, "Wrote JSON report");

    Ok(())
}
