use serde::{Deserialize, Serialize};

/// Record counts partitioned by operating status.
///
/// `total` counts every record; records tagged `unknown` land in no bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total: usize,
    pub running: usize,
    pub idle: usize,
    pub stopped: usize,
    pub maintenance: usize,
}

impl StatusSummary {
    /// Records that fell into none of the four named buckets.
    pub fn unclassified(&self) -> usize {
        let classified = self.running + self.idle + self.stopped + self.maintenance;
        self.total.saturating_sub(classified)
    }
}

/// Headline figures derived from one record snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_production: f64,
    pub avg_efficiency: f64,
    pub total_errors: f64,
    pub error1_count: f64,
    pub error2_count: f64,
    pub status_summary: StatusSummary,
    /// Distinct design codes in order of first appearance.
    pub designs: Vec<String>,
}
