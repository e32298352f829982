//! Tokio event loop driving a [`crate::dashboard::DashboardSession`].

pub mod errors;
pub mod event_loop;
pub mod handle;

pub use errors::DashboardError;
pub use event_loop::{spawn_dashboard, spawn_dashboard_with_filter};
pub use handle::{DashboardCommand, DashboardHandle};
