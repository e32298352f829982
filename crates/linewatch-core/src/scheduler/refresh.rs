use std::time::Duration;

use tracing::{debug, info};

use crate::filter::DeviceSelection;
use crate::ingest::{IngestRequest, RequestId};
use crate::scheduler::errors::SchedulerError;
use crate::scheduler::timer::TimerDriver;
use crate::scheduler::types::{DiscardReason, SchedulerState, TimerId};

/// Polling lifecycle of one dashboard session.
///
/// A sans-IO state machine: it decides *when* an ingestion is needed and
/// whether a finished one is still current, but never performs the fetch
/// itself. Every operation that needs a fetch returns an [`IngestRequest`];
/// the caller runs it and hands the request back with the result.
///
/// Invariants:
/// - at most one timer is armed at any time;
/// - a result is current only if it was issued after the latest `stop()`,
///   for the currently selected device, and is not older than the last
///   applied result.
pub struct RefreshScheduler<T: TimerDriver> {
    timer: T,
    state: SchedulerState,
    interval_secs: u64,
    active_timer: Option<TimerId>,
    selected_device: DeviceSelection,
    next_request: u64,
    /// Bumped by every effective `stop()`; requests from an older epoch
    /// are never applied.
    epoch: u64,
    last_applied: Option<RequestId>,
}

impl<T: TimerDriver> RefreshScheduler<T> {
    pub fn new(timer: T, interval_secs: u64) -> Result<Self, SchedulerError> {
        validate_interval(interval_secs)?;
        Ok(Self {
            timer,
            state: SchedulerState::Stopped,
            interval_secs,
            active_timer: None,
            selected_device: DeviceSelection::All,
            next_request: 0,
            epoch: 0,
            last_applied: None,
        })
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Configured period, used by the next `start()` while stopped.
    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    pub fn selected_device(&self) -> &DeviceSelection {
        &self.selected_device
    }

    pub fn active_timer(&self) -> Option<TimerId> {
        self.active_timer
    }

    pub fn last_applied(&self) -> Option<RequestId> {
        self.last_applied
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Begin auto-refresh: re-arm the single timer and request an
    /// immediate ingestion.
    pub fn start(&mut self, interval_secs: u64) -> Result<IngestRequest, SchedulerError> {
        validate_interval(interval_secs)?;

        self.disarm();
        self.interval_secs = interval_secs;
        let timer_id = self.timer.arm(Duration::from_secs(interval_secs));
        self.active_timer = Some(timer_id);
        self.state = SchedulerState::Scheduled { interval_secs };

        info!(
            event = "core.scheduler.start_completed",
            interval_secs = interval_secs,
            timer_id = timer_id.0
        );

        Ok(self.issue())
    }

    /// Stop auto-refresh. Idempotent.
    ///
    /// Results of requests issued before this call are discarded when they
    /// arrive, including manual refreshes.
    pub fn stop(&mut self) {
        if self.state == SchedulerState::Stopped {
            debug!(event = "core.scheduler.stop_skipped", reason = "already stopped");
            return;
        }

        self.disarm();
        self.state = SchedulerState::Stopped;
        self.epoch += 1;

        info!(event = "core.scheduler.stop_completed");
    }

    /// Change the refresh period.
    ///
    /// While scheduled this re-arms the timer without an extra ingestion;
    /// while stopped it only records the value for the next `start()`.
    pub fn set_interval(&mut self, interval_secs: u64) -> Result<(), SchedulerError> {
        validate_interval(interval_secs)?;
        self.interval_secs = interval_secs;

        if self.state.is_scheduled() {
            self.disarm();
            let timer_id = self.timer.arm(Duration::from_secs(interval_secs));
            self.active_timer = Some(timer_id);
            self.state = SchedulerState::Scheduled { interval_secs };
        }

        info!(
            event = "core.scheduler.interval_changed",
            interval_secs = interval_secs,
            rearmed = self.state.is_scheduled()
        );

        Ok(())
    }

    /// Out-of-band ingestion for `device`, which becomes the selected device.
    ///
    /// Leaves the scheduler state and its timer untouched.
    pub fn refresh_now(&mut self, device: DeviceSelection) -> IngestRequest {
        if device != self.selected_device {
            info!(
                event = "core.scheduler.device_selected",
                previous = %self.selected_device,
                device = %device
            );
            self.selected_device = device;
        }
        self.issue()
    }

    /// Change the selected device without issuing a request.
    ///
    /// In-flight results for the previous device become stale.
    pub fn select_device(&mut self, device: DeviceSelection) {
        self.selected_device = device;
    }

    /// A timer fired. Ticks from anything but the armed timer are ignored.
    pub fn tick(&mut self, timer_id: TimerId) -> Option<IngestRequest> {
        if !self.state.is_scheduled() || self.active_timer != Some(timer_id) {
            debug!(
                event = "core.scheduler.tick_ignored",
                timer_id = timer_id.0,
                reason = "timer not armed"
            );
            return None;
        }
        Some(self.issue())
    }

    /// Whether a finished request may still be applied to visible state.
    pub fn check_current(&self, request: &IngestRequest) -> Result<(), DiscardReason> {
        if request.epoch != self.epoch {
            return Err(DiscardReason::StopSuppressed);
        }
        if request.device != self.selected_device {
            return Err(DiscardReason::DeviceSuperseded);
        }
        if self.last_applied.is_some_and(|last| request.id < last) {
            return Err(DiscardReason::OutOfOrder);
        }
        Ok(())
    }

    /// Record that `request`'s result replaced the visible snapshot.
    pub fn mark_applied(&mut self, request: &IngestRequest) {
        self.last_applied = Some(request.id);
    }

    fn issue(&mut self) -> IngestRequest {
        self.next_request += 1;
        let request = IngestRequest {
            id: RequestId(self.next_request),
            device: self.selected_device.clone(),
            epoch: self.epoch,
        };
        debug!(
            event = "core.scheduler.request_issued",
            request_id = request.id.0,
            device = %request.device
        );
        request
    }

    fn disarm(&mut self) {
        if let Some(timer_id) = self.active_timer.take() {
            self.timer.cancel(timer_id);
        }
    }
}

fn validate_interval(interval_secs: u64) -> Result<(), SchedulerError> {
    if interval_secs == 0 {
        return Err(SchedulerError::InvalidInterval { interval_secs });
    }
    Ok(())
}
