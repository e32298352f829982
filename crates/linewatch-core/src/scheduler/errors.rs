use crate::errors::LinewatchError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("Refresh interval must be a positive number of seconds, got {interval_secs}")]
    InvalidInterval { interval_secs: u64 },
}

impl LinewatchError for SchedulerError {
    fn error_code(&self) -> &'static str {
        match self {
            SchedulerError::InvalidInterval { .. } => "SCHEDULER_INVALID_INTERVAL",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
