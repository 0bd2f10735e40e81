//! Markdown rendering of a cluster report.

use crate::models::ClusterReport;
use std::fmt::Write as _;

/// Render the report as Markdown: a heading per cluster, its member URLs
/// listed beneath in original input order.
pub fn report_to_markdown(report: &ClusterReport) -> String {
    let mut md = String::new();
    let _ = writeln!(
        md,
        "# Article Clusters: {} {}",
        report.local_date, report.local_time
    );
    let _ = writeln!(
        md,
        "\n{} articles in {} clusters",
        report.article_count,
        report.groups.len()
    );

    for group in &report.groups {
        let _ = writeln!(md, "\n## Cluster {}\n", group.cluster_id);
        for url in &group.urls {
            let _ = writeln!(md, "- {url}");
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClusterReport;

    #[test]
    fn test_renders_one_section_per_cluster() {
        let urls: Vec<String> = ["http://a.example/1", "http://b.example/2", "http://a.example/3"]
            .iter()
            .map(|u| u.to_string())
            .collect();
        let report = ClusterReport::from_assignments(&urls, &[0, 1, 0]);

        let md = report_to_markdown(&report);

        assert!(md.contains("## Cluster 0"));
        assert!(md.contains("## Cluster 1"));
        assert!(md.contains("- http://a.example/1"));
        assert!(md.contains("3 articles in 2 clusters"));
        // Input order within a cluster.
        let first = md.find("http://a.example/1").unwrap();
        let third = md.find("http://a.example/3").unwrap();
        assert!(first < third);
    }
}
