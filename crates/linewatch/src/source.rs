//! HTTP telemetry source backed by `reqwest`.

use std::time::Duration;

use linewatch_core::config::BackendConfig;
use linewatch_core::{DeviceSelection, IngestError, TelemetryEnvelope, TelemetrySource};
use tracing::debug;

/// Fetches the machine data endpoint of a telemetry backend.
///
/// `GET {url}{endpoint}` for all devices, with `?deviceId=<id>` appended
/// for a single device.
#[derive(Debug, Clone)]
pub struct HttpTelemetrySource {
    client: reqwest::Client,
    endpoint_url: String,
    token: Option<String>,
}

impl HttpTelemetrySource {
    pub fn from_config(backend: &BackendConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(backend.timeout_secs()))
            .build()?;

        Ok(Self {
            client,
            endpoint_url: join_url(backend.url(), backend.endpoint()),
            token: backend.token().map(str::to_string),
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    fn build_request(&self, device: &DeviceSelection) -> Result<reqwest::Request, reqwest::Error> {
        let mut builder = self.client.get(&self.endpoint_url);
        if let Some(id) = device.as_deref() {
            builder = builder.query(&[("deviceId", id)]);
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder.build()
    }
}

impl TelemetrySource for HttpTelemetrySource {
    async fn fetch(&self, device: &DeviceSelection) -> Result<TelemetryEnvelope, IngestError> {
        let request = self.build_request(device).map_err(|e| IngestError::Transport {
            message: e.to_string(),
        })?;
        debug!(event = "cli.fetch_started", url = %request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| IngestError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::HttpStatus {
                status: status.as_u16(),
            });
        }

        response
            .json::<TelemetryEnvelope>()
            .await
            .map_err(|e| IngestError::MalformedEnvelope {
                message: e.to_string(),
            })
    }
}

/// Join base URL and endpoint path with exactly one slash between them.
fn join_url(base: &str, endpoint: &str) -> String {
    let base = base.trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');
    if endpoint.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{endpoint}")
    }
}
