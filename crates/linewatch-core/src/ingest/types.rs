use std::fmt;

use serde::{Deserialize, Serialize};

use crate::filter::DeviceSelection;
use crate::ingest::errors::IngestError;
use crate::telemetry::RawRecord;

/// Response body of the telemetry endpoint.
///
/// `data` stays untyped here; [`TelemetryEnvelope::into_rows`] decides
/// whether the envelope is usable at all.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TelemetryEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TelemetryEnvelope {
    /// Successful envelope carrying `rows`.
    pub fn ok(rows: Vec<serde_json::Value>) -> Self {
        Self {
            success: true,
            data: serde_json::Value::Array(rows),
            message: None,
        }
    }

    /// Failed envelope, as the backend reports it.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: serde_json::Value::Null,
            message: Some(message.into()),
        }
    }

    /// Unwrap the raw rows, rejecting `success: false` and non-array data.
    pub fn into_rows(self) -> Result<Vec<RawRecord>, IngestError> {
        if !self.success {
            return Err(IngestError::Rejected {
                message: self
                    .message
                    .unwrap_or_else(|| "no message provided".to_string()),
            });
        }

        match self.data {
            serde_json::Value::Array(rows) => Ok(rows.into_iter().map(RawRecord::new).collect()),
            other => Err(IngestError::MalformedEnvelope {
                message: format!("expected array data, got {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Monotonic identifier of an ingestion request within one scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fetch the scheduler wants performed.
///
/// Issued by the scheduler and handed back unchanged with the fetch result,
/// so the scheduler can tell whether the result is still current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestRequest {
    pub id: RequestId,
    pub device: DeviceSelection,
    pub(crate) epoch: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_into_rows() {
        let envelope: TelemetryEnvelope = serde_json::from_value(json!({
            "success": true,
            "data": [{"deviceId": "D1"}, {"deviceId": "D2"}]
        }))
        .unwrap();

        let rows = envelope.into_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].field(&["deviceId"]), Some(&json!("D2")));
    }

    #[test]
    fn test_envelope_success_false_is_rejected() {
        let envelope: TelemetryEnvelope = serde_json::from_value(json!({
            "success": false,
            "message": "Unauthorized"
        }))
        .unwrap();

        assert_eq!(
            envelope.into_rows(),
            Err(IngestError::Rejected {
                message: "Unauthorized".to_string()
            })
        );
    }

    #[test]
    fn test_envelope_missing_success_is_rejected() {
        let envelope: TelemetryEnvelope = serde_json::from_value(json!({"data": []})).unwrap();
        assert!(matches!(
            envelope.into_rows(),
            Err(IngestError::Rejected { .. })
        ));
    }

    #[test]
    fn test_envelope_non_array_data_is_malformed() {
        for data in [json!({"deviceId": "D1"}), json!(null), json!("rows")] {
            let envelope = TelemetryEnvelope {
                success: true,
                data,
                message: None,
            };
            assert!(matches!(
                envelope.into_rows(),
                Err(IngestError::MalformedEnvelope { .. })
            ));
        }
    }

    #[test]
    fn test_envelope_empty_array_is_valid() {
        assert_eq!(TelemetryEnvelope::ok(vec![]).into_rows(), Ok(vec![]));
    }
}
