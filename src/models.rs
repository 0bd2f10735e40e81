//! Data models for rendered clustering results.
//!
//! The pipeline itself works with positional label sequences; these types
//! reshape one run's outcome into the presentation form used by the
//! Markdown and JSON renderers: one group per distinct cluster id, each
//! listing its URLs in original input order.

use chrono::Local;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The articles assigned to one cluster.
#[derive(Debug, Deserialize, Serialize)]
pub struct ClusterGroup {
    /// Cluster id in `[0, k)`.
    pub cluster_id: usize,
    /// Member URLs, in the order they appeared in the input list.
    pub urls: Vec<String>,
}

/// One run's cluster groupings, stamped with the local date and time.
#[derive(Debug, Deserialize, Serialize)]
pub struct ClusterReport {
    /// The date of the run in `YYYY-MM-DD` format.
    pub local_date: String,
    /// The local time of the run in `HH:MM:SS` format.
    pub local_time: String,
    /// Total number of articles that received an assignment.
    pub article_count: usize,
    /// Groups ordered by ascending cluster id.
    pub groups: Vec<ClusterGroup>,
}

impl ClusterReport {
    /// Group survivor URLs by their cluster assignment.
    ///
    /// `urls` and `labels` must be index-aligned, as produced by the
    /// pipeline. Only cluster ids that actually occur get a group.
    pub fn from_assignments(urls: &[String], labels: &[usize]) -> Self {
        let by_cluster = labels
            .iter()
            .copied()
            .zip(urls.iter().cloned())
            .into_group_map();

        let groups = by_cluster
            .into_iter()
            .sorted_by_key(|(cluster_id, _)| *cluster_id)
            .map(|(cluster_id, urls)| ClusterGroup { cluster_id, urls })
            .collect();

        let now = Local::now();
        Self {
            local_date: now.date_naive().to_string(),
            local_time: now.time().format("%H:%M:%S").to_string(),
            article_count: urls.len(),
            groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls_of(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_groups_preserve_input_order() {
        let urls = urls_of(&["u0", "u1", "u2", "u3"]);
        let labels = vec![1, 0, 1, 0];

        let report = ClusterReport::from_assignments(&urls, &labels);

        assert_eq!(report.article_count, 4);
        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.groups[0].cluster_id, 0);
        assert_eq!(report.groups[0].urls, urls_of(&["u1", "u3"]));
        assert_eq!(report.groups[1].cluster_id, 1);
        assert_eq!(report.groups[1].urls, urls_of(&["u0", "u2"]));
    }

    #[test]
    fn test_only_occurring_cluster_ids_get_groups() {
        let urls = urls_of(&["u0", "u1"]);
        let labels = vec![3, 3];

        let report = ClusterReport::from_assignments(&urls, &labels);

        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].cluster_id, 3);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = ClusterReport::from_assignments(&urls_of(&["u0"]), &[0]);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("cluster_id"));
        assert!(json.contains("u0"));
    }
}
