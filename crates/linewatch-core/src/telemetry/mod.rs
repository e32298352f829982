//! Canonical telemetry records and the normalizer that produces them.

pub mod normalize;
pub mod types;

pub use normalize::{TIMESTAMP_FORMAT, normalize, normalize_at, normalize_batch};
pub use types::{MachineRecord, RawRecord, StatusTag, UNKNOWN_CODE, UNKNOWN_DEVICE};
