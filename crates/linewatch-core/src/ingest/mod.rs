//! Ingestion boundary: the fetch capability and its response envelope.

pub mod errors;
pub mod source;
pub mod types;

pub use errors::IngestError;
pub use source::TelemetrySource;
pub use types::{IngestRequest, RequestId, TelemetryEnvelope};
