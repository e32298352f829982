//! Facet filtering over record snapshots.

pub mod operations;
pub mod types;

pub use operations::{distinct_values, filter_records};
pub use types::{
    ALL, DeviceSelection, Facet, FacetOptions, FacetValue, FilterSpec, STATUS_FACET_OPTIONS,
};
