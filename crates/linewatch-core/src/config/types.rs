use serde::{Deserialize, Serialize};

/// Effective configuration of a dashboard process.
///
/// Every field is optional in the file; accessors on the sections supply
/// the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinewatchConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,
}

/// Where telemetry is fetched from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the telemetry backend.
    /// Default: `http://localhost:5000`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Path of the machine data endpoint, appended to `url`.
    /// Default: `/api/machine-data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Bearer token sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Per-request timeout in seconds.
    /// Default: 10 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Periodic refresh behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Seconds between scheduled refreshes.
    /// Default: 10 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,

    /// Whether `watch` starts polling on launch.
    /// Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_refresh: Option<bool>,
}
