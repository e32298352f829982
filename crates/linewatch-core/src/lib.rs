//! linewatch-core: telemetry engine for machine operations dashboards
//!
//! Turns loosely typed machine telemetry into canonical records, derives
//! summary figures, filters snapshots by facet, and schedules periodic
//! refreshes without letting stale results overwrite fresh ones.
//!
//! # Main Entry Points
//!
//! - [`telemetry`] - Normalize raw rows into [`MachineRecord`]s
//! - [`summary`] - Aggregate a snapshot into [`SummaryStats`]
//! - [`filter`] - Facet filtering and facet option lists
//! - [`scheduler`] - Refresh lifecycle state machine
//! - [`dashboard`] - Session context tying the above together
//! - [`runtime`] - Tokio event loop driving a session
//! - [`config`] - Configuration management

pub mod config;
pub mod dashboard;
pub mod errors;
pub mod events;
pub mod filter;
pub mod ingest;
pub mod logging;
pub mod runtime;
pub mod scheduler;
pub mod summary;
pub mod telemetry;

// Re-export commonly used types at crate root for convenience
pub use config::LinewatchConfig;
pub use dashboard::{DashboardSession, DashboardSnapshot, DashboardView};
pub use errors::LinewatchError;
pub use filter::{DeviceSelection, FacetOptions, FacetValue, FilterSpec};
pub use ingest::{IngestError, TelemetryEnvelope, TelemetrySource};
pub use runtime::{
    DashboardError, DashboardHandle, spawn_dashboard, spawn_dashboard_with_filter,
};
pub use scheduler::{RefreshScheduler, SchedulerState};
pub use summary::SummaryStats;
pub use telemetry::{MachineRecord, RawRecord, StatusTag};

pub use logging::init_logging;
