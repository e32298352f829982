//! Refresh scheduler: the polling lifecycle of a dashboard session.

pub mod errors;
pub mod refresh;
pub mod timer;
pub mod types;

pub use errors::SchedulerError;
pub use refresh::RefreshScheduler;
pub use timer::{ManualTimer, TimerDriver, TokioTimer};
pub use types::{ApplyOutcome, DiscardReason, SchedulerState, TimerId};
