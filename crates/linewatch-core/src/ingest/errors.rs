use crate::errors::LinewatchError;

/// A failed ingestion cycle. Always recoverable: the previous snapshot stays
/// visible and the next poll starts from scratch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("Failed to reach telemetry backend: {message}")]
    Transport { message: String },

    #[error("Telemetry backend responded with HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Telemetry backend reported failure: {message}")]
    Rejected { message: String },

    #[error("Malformed telemetry envelope: {message}")]
    MalformedEnvelope { message: String },
}

impl LinewatchError for IngestError {
    fn error_code(&self) -> &'static str {
        match self {
            IngestError::Transport { .. } => "INGEST_TRANSPORT",
            IngestError::HttpStatus { .. } => "INGEST_HTTP_STATUS",
            IngestError::Rejected { .. } => "INGEST_REJECTED",
            IngestError::MalformedEnvelope { .. } => "INGEST_MALFORMED_ENVELOPE",
        }
    }
}
