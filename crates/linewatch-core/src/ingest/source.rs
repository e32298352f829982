use std::future::Future;

use crate::filter::DeviceSelection;
use crate::ingest::errors::IngestError;
use crate::ingest::types::TelemetryEnvelope;

/// Already-authenticated capability to pull telemetry from the backend.
///
/// `DeviceSelection::All` requests every device; `Only(id)` scopes the
/// request to a single device on the server side.
pub trait TelemetrySource: Send + Sync + 'static {
    fn fetch(
        &self,
        device: &DeviceSelection,
    ) -> impl Future<Output = Result<TelemetryEnvelope, IngestError>> + Send;
}
