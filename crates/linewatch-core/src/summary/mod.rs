//! Headline summary figures computed from a record snapshot.

pub mod operations;
pub mod types;

pub use operations::aggregate;
pub use types::{StatusSummary, SummaryStats};
