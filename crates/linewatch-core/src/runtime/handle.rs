use tokio::sync::{mpsc, watch};

use crate::dashboard::DashboardView;
use crate::filter::{DeviceSelection, FilterSpec};
use crate::runtime::errors::DashboardError;
use crate::scheduler::SchedulerError;

/// Requests accepted by the dashboard event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCommand {
    Start { interval_secs: u64 },
    Stop,
    SetInterval { interval_secs: u64 },
    /// Refresh the current device selection.
    Refresh,
    /// Refresh and switch the device selection.
    RefreshNow { device: DeviceSelection },
    SetFilter(FilterSpec),
    Shutdown,
}

/// Cloneable front end of a running dashboard.
///
/// Commands are queued and handled in order by the event loop; the latest
/// view is always available without waiting.
#[derive(Clone)]
pub struct DashboardHandle {
    commands: mpsc::UnboundedSender<DashboardCommand>,
    view: watch::Receiver<DashboardView>,
}

impl DashboardHandle {
    pub(crate) fn new(
        commands: mpsc::UnboundedSender<DashboardCommand>,
        view: watch::Receiver<DashboardView>,
    ) -> Self {
        Self { commands, view }
    }

    pub fn start(&self, interval_secs: u64) -> Result<(), DashboardError> {
        ensure_positive(interval_secs)?;
        self.send(DashboardCommand::Start { interval_secs })
    }

    pub fn stop(&self) -> Result<(), DashboardError> {
        self.send(DashboardCommand::Stop)
    }

    pub fn set_interval(&self, interval_secs: u64) -> Result<(), DashboardError> {
        ensure_positive(interval_secs)?;
        self.send(DashboardCommand::SetInterval { interval_secs })
    }

    pub fn refresh(&self) -> Result<(), DashboardError> {
        self.send(DashboardCommand::Refresh)
    }

    pub fn refresh_now(&self, device: DeviceSelection) -> Result<(), DashboardError> {
        self.send(DashboardCommand::RefreshNow { device })
    }

    pub fn set_filter(&self, spec: FilterSpec) -> Result<(), DashboardError> {
        self.send(DashboardCommand::SetFilter(spec))
    }

    pub fn shutdown(&self) -> Result<(), DashboardError> {
        self.send(DashboardCommand::Shutdown)
    }

    /// Latest published view.
    pub fn view(&self) -> DashboardView {
        self.view.borrow().clone()
    }

    /// Receiver notified on every published view.
    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.view.clone()
    }

    fn send(&self, command: DashboardCommand) -> Result<(), DashboardError> {
        self.commands
            .send(command)
            .map_err(|_| DashboardError::LoopClosed)
    }
}

fn ensure_positive(interval_secs: u64) -> Result<(), SchedulerError> {
    if interval_secs == 0 {
        return Err(SchedulerError::InvalidInterval { interval_secs });
    }
    Ok(())
}
