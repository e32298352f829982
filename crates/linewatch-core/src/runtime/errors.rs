use crate::errors::LinewatchError;
use crate::scheduler::SchedulerError;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Dashboard event loop is no longer running")]
    LoopClosed,
}

impl LinewatchError for DashboardError {
    fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Scheduler(e) => e.error_code(),
            DashboardError::LoopClosed => "DASHBOARD_LOOP_CLOSED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            DashboardError::Scheduler(e) => e.is_user_error(),
            DashboardError::LoopClosed => false,
        }
    }
}
