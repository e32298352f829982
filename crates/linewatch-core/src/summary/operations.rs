use std::collections::HashSet;

use crate::summary::types::{StatusSummary, SummaryStats};
use crate::telemetry::{MachineRecord, StatusTag};

/// Reduce a record snapshot into its summary figures in a single pass.
///
/// Total: an empty slice yields the all-zero summary.
pub fn aggregate(records: &[MachineRecord]) -> SummaryStats {
    let mut total_production = 0.0;
    let mut efficiency_sum = 0.0;
    let mut error1_count = 0.0;
    let mut error2_count = 0.0;
    let mut status_summary = StatusSummary {
        total: records.len(),
        ..StatusSummary::default()
    };
    let mut seen_designs = HashSet::new();
    let mut designs = Vec::new();

    for record in records {
        total_production += record.count;
        efficiency_sum += record.efficiency;
        error1_count += record.error1;
        error2_count += record.error2;

        match record.status {
            StatusTag::Running => status_summary.running += 1,
            StatusTag::Idle => status_summary.idle += 1,
            StatusTag::Stopped => status_summary.stopped += 1,
            StatusTag::Maintenance => status_summary.maintenance += 1,
            StatusTag::Unknown => {}
        }

        if seen_designs.insert(record.design.as_str()) {
            designs.push(record.design.clone());
        }
    }

    let avg_efficiency = if records.is_empty() {
        0.0
    } else {
        efficiency_sum / records.len() as f64
    };

    SummaryStats {
        total_production,
        avg_efficiency,
        total_errors: error1_count + error2_count,
        error1_count,
        error2_count,
        status_summary,
        designs,
    }
}
