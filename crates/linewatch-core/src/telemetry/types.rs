use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Device identifier used when the backend omits one.
pub const UNKNOWN_DEVICE: &str = "Unknown";

/// Placeholder for an unknown shift or design code.
pub const UNKNOWN_CODE: &str = "-";

/// Canonical operating state of a machine.
///
/// Closed set: any backend value outside the four named states maps to
/// `Unknown`, whatever its casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTag {
    Running,
    Idle,
    Stopped,
    Maintenance,
    #[default]
    Unknown,
}

impl StatusTag {
    /// The four named states, in display order.
    pub const NAMED: [StatusTag; 4] = [
        StatusTag::Running,
        StatusTag::Idle,
        StatusTag::Stopped,
        StatusTag::Maintenance,
    ];

    /// Map free-form backend text onto the closed tag set.
    ///
    /// Matching ignores case and surrounding whitespace.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "running" => StatusTag::Running,
            "idle" => StatusTag::Idle,
            "stopped" => StatusTag::Stopped,
            "maintenance" => StatusTag::Maintenance,
            _ => StatusTag::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTag::Running => "running",
            StatusTag::Idle => "idle",
            StatusTag::Stopped => "stopped",
            StatusTag::Maintenance => "maintenance",
            StatusTag::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusTag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(StatusTag::from_raw(s))
    }
}

/// One device reading in canonical form.
///
/// Produced only by [`crate::telemetry::normalize`]; every field already
/// carries its documented default when the backend omitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineRecord {
    pub device_id: String,
    /// Reading time rendered as `%Y-%m-%d %H:%M:%S` (UTC).
    pub timestamp: String,
    pub shift: String,
    pub design: String,
    pub count: f64,
    pub efficiency: f64,
    pub error1: f64,
    pub error2: f64,
    pub status: StatusTag,
}

impl MachineRecord {
    /// Combined error count for this reading.
    pub fn total_errors(&self) -> f64 {
        self.error1 + self.error2
    }
}

/// A loosely typed backend row.
///
/// This is the only place untyped JSON is allowed to travel; everything
/// past the normalizer works on [`MachineRecord`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(serde_json::Value);

impl RawRecord {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Look up the first present, non-null field among `keys`.
    ///
    /// Returns `None` when the row is not an object at all.
    pub fn field(&self, keys: &[&str]) -> Option<&serde_json::Value> {
        let object = self.0.as_object()?;
        keys.iter()
            .filter_map(|key| object.get(*key))
            .find(|value| !value.is_null())
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for RawRecord {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl From<&MachineRecord> for RawRecord {
    fn from(record: &MachineRecord) -> Self {
        // Infallible for this shape: strings, finite floats, unit enum.
        Self(serde_json::to_value(record).unwrap_or_default())
    }
}
