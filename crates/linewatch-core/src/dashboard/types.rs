use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::filter::{FacetOptions, FilterSpec};
use crate::ingest::RequestId;
use crate::scheduler::SchedulerState;
use crate::summary::SummaryStats;
use crate::telemetry::MachineRecord;

/// One applied ingestion: the records and the summary derived from them.
///
/// Always replaced as a whole; records and summary never drift apart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub records: Arc<[MachineRecord]>,
    pub summary: SummaryStats,
    pub fetched_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub request: Option<RequestId>,
}

impl DashboardSnapshot {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Everything presentation needs to render one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    /// Incremented on every published view.
    pub revision: u64,
    pub state: SchedulerState,
    pub interval_secs: u64,
    pub filter: FilterSpec,
    pub snapshot: Arc<DashboardSnapshot>,
    /// Records of `snapshot` passing `filter`, in snapshot order.
    pub visible: Vec<MachineRecord>,
    pub facets: FacetOptions,
    /// Message of the most recent failed ingestion, cleared by the next
    /// applied one.
    pub notice: Option<String>,
}
