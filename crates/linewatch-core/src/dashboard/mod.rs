//! Dashboard session context: snapshot, facet selection and scheduler.

pub mod session;
pub mod types;

pub use session::DashboardSession;
pub use types::{DashboardSnapshot, DashboardView};
