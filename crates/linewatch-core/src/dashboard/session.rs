use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::dashboard::types::{DashboardSnapshot, DashboardView};
use crate::filter::{DeviceSelection, FacetOptions, FilterSpec, filter_records};
use crate::ingest::{IngestError, IngestRequest, TelemetryEnvelope};
use crate::scheduler::{
    ApplyOutcome, RefreshScheduler, SchedulerError, SchedulerState, TimerDriver, TimerId,
};
use crate::summary::aggregate;
use crate::telemetry::{MachineRecord, normalize_batch};

/// State of one dashboard instance.
///
/// Owns the scheduler, the current snapshot, and the facet selection.
/// Nothing here is global, so independent sessions can coexist. The
/// device facet always mirrors the scheduler's selected device.
pub struct DashboardSession<T: TimerDriver> {
    scheduler: RefreshScheduler<T>,
    snapshot: Arc<DashboardSnapshot>,
    filter: FilterSpec,
    notice: Option<String>,
}

impl<T: TimerDriver> DashboardSession<T> {
    pub fn new(timer: T, interval_secs: u64) -> Result<Self, SchedulerError> {
        Ok(Self {
            scheduler: RefreshScheduler::new(timer, interval_secs)?,
            snapshot: Arc::new(DashboardSnapshot::default()),
            filter: FilterSpec::default(),
            notice: None,
        })
    }

    /// Seed the facet selection before the first request is issued.
    pub fn with_filter(mut self, spec: FilterSpec) -> Self {
        self.scheduler.select_device(spec.device.clone());
        self.filter = spec;
        self
    }

    pub fn scheduler(&self) -> &RefreshScheduler<T> {
        &self.scheduler
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn snapshot(&self) -> &Arc<DashboardSnapshot> {
        &self.snapshot
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn start(&mut self, interval_secs: u64) -> Result<IngestRequest, SchedulerError> {
        self.scheduler.start(interval_secs)
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn set_interval(&mut self, interval_secs: u64) -> Result<(), SchedulerError> {
        self.scheduler.set_interval(interval_secs)
    }

    pub fn tick(&mut self, timer_id: TimerId) -> Option<IngestRequest> {
        self.scheduler.tick(timer_id)
    }

    /// Manual refresh scoped to the current device selection.
    pub fn refresh(&mut self) -> IngestRequest {
        let device = self.filter.device.clone();
        self.scheduler.refresh_now(device)
    }

    /// Manual refresh that also switches the device selection.
    pub fn refresh_now(&mut self, device: DeviceSelection) -> IngestRequest {
        self.filter.device = device.clone();
        self.scheduler.refresh_now(device)
    }

    /// Replace the facet selection.
    ///
    /// Shift, design and status are applied locally. A device change needs
    /// fresh data scoped to that device, so it returns the request to run.
    pub fn set_filter(&mut self, spec: FilterSpec) -> Option<IngestRequest> {
        let device_changed = spec.device != self.filter.device;
        let device = spec.device.clone();
        self.filter = spec;

        device_changed.then(|| self.scheduler.refresh_now(device))
    }

    /// Apply the result of a finished request, unless it is stale.
    ///
    /// Failures keep the previous snapshot visible and set the notice.
    pub fn complete(
        &mut self,
        request: IngestRequest,
        result: Result<TelemetryEnvelope, IngestError>,
    ) -> ApplyOutcome {
        if let Err(reason) = self.scheduler.check_current(&request) {
            debug!(
                event = "core.scheduler.result_discarded",
                request_id = request.id.0,
                device = %request.device,
                reason = %reason
            );
            return ApplyOutcome::Discarded {
                request: request.id,
                reason,
            };
        }

        let rows = match result.and_then(TelemetryEnvelope::into_rows) {
            Ok(rows) => rows,
            Err(error) => {
                warn!(
                    event = "core.ingest.fetch_failed",
                    request_id = request.id.0,
                    device = %request.device,
                    error = %error
                );
                self.notice = Some(error.to_string());
                return ApplyOutcome::Failed {
                    request: request.id,
                    error,
                };
            }
        };

        let records: Arc<[MachineRecord]> = normalize_batch(&rows).into();
        let summary = aggregate(&records);
        let count = records.len();

        self.snapshot = Arc::new(DashboardSnapshot {
            records,
            summary,
            fetched_at: Some(Utc::now()),
            request: Some(request.id),
        });
        self.notice = None;
        self.scheduler.mark_applied(&request);

        info!(
            event = "core.ingest.snapshot_applied",
            request_id = request.id.0,
            device = %request.device,
            records = count
        );

        ApplyOutcome::Applied {
            request: request.id,
            records: count,
        }
    }

    /// Current snapshot records passing the facet selection.
    pub fn visible(&self) -> Vec<&MachineRecord> {
        filter_records(&self.snapshot.records, &self.filter)
    }

    /// Facet choices from the unfiltered snapshot.
    pub fn facet_options(&self) -> FacetOptions {
        FacetOptions::from_records(&self.snapshot.records)
    }

    /// Render-ready view of the session at `revision`.
    pub fn view(&self, revision: u64) -> DashboardView {
        DashboardView {
            revision,
            state: self.scheduler.state(),
            interval_secs: self.scheduler.interval_secs(),
            filter: self.filter.clone(),
            snapshot: Arc::clone(&self.snapshot),
            visible: self.visible().into_iter().cloned().collect(),
            facets: self.facet_options(),
            notice: self.notice.clone(),
        }
    }
}
