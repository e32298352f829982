use std::fmt;

use serde::Serialize;

use crate::ingest::{IngestError, RequestId};

/// Polling lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SchedulerState {
    #[default]
    Stopped,
    Scheduled { interval_secs: u64 },
}

impl SchedulerState {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, SchedulerState::Scheduled { .. })
    }
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerState::Stopped => write!(f, "stopped"),
            SchedulerState::Scheduled { interval_secs } => {
                write!(f, "auto-refresh every {}s", interval_secs)
            }
        }
    }
}

/// Handle of one armed recurring timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Why a completed ingestion was not applied to the visible snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    /// Issued before the most recent `stop()`.
    StopSuppressed,
    /// Issued for a device selection that has since changed.
    DeviceSuperseded,
    /// A newer request has already been applied.
    OutOfOrder,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardReason::StopSuppressed => write!(f, "scheduler stopped"),
            DiscardReason::DeviceSuperseded => write!(f, "device selection changed"),
            DiscardReason::OutOfOrder => write!(f, "newer result already applied"),
        }
    }
}

/// What happened to a completed ingestion.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    Applied { request: RequestId, records: usize },
    Discarded { request: RequestId, reason: DiscardReason },
    Failed { request: RequestId, error: IngestError },
}

impl ApplyOutcome {
    pub fn request(&self) -> RequestId {
        match self {
            ApplyOutcome::Applied { request, .. }
            | ApplyOutcome::Discarded { request, .. }
            | ApplyOutcome::Failed { request, .. } => *request,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyOutcome::Applied { .. })
    }
}
