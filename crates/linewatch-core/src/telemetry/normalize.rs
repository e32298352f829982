use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::telemetry::types::{MachineRecord, RawRecord, StatusTag, UNKNOWN_CODE, UNKNOWN_DEVICE};

/// Render format for [`MachineRecord::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Epoch values above this are treated as milliseconds.
const EPOCH_MILLIS_THRESHOLD: f64 = 1e11;

/// Convert one backend row into a canonical record.
///
/// Never fails. Missing or mistyped fields fall back to their defaults, and
/// the current clock is only consulted when the timestamp is unusable.
pub fn normalize(raw: &RawRecord) -> MachineRecord {
    normalize_at(raw, Utc::now())
}

/// Same as [`normalize`] with an explicit fallback clock.
pub fn normalize_at(raw: &RawRecord, now: DateTime<Utc>) -> MachineRecord {
    if !raw.as_value().is_object() {
        debug!(event = "core.telemetry.malformed_record", reason = "not an object");
    }

    MachineRecord {
        device_id: text_or(raw.field(&["deviceId", "device_id"]), UNKNOWN_DEVICE),
        timestamp: timestamp_or(raw.field(&["timestamp", "time"]), now),
        shift: text_or(raw.field(&["shift"]), UNKNOWN_CODE),
        design: text_or(raw.field(&["design"]), UNKNOWN_CODE),
        count: non_negative(raw.field(&["count", "production"])),
        efficiency: numeric_or_zero(raw.field(&["efficiency"])),
        error1: non_negative(raw.field(&["error1", "error_1"])),
        error2: non_negative(raw.field(&["error2", "error_2"])),
        status: raw
            .field(&["status"])
            .and_then(Value::as_str)
            .map(StatusTag::from_raw)
            .unwrap_or_default(),
    }
}

/// Normalize a batch of rows, preserving order.
pub fn normalize_batch(rows: &[RawRecord]) -> Vec<MachineRecord> {
    let now = Utc::now();
    rows.iter().map(|row| normalize_at(row, now)).collect()
}

fn text_or(value: Option<&Value>, default: &str) -> String {
    let text = match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return default.to_string(),
    };

    if text.trim().is_empty() {
        default.to_string()
    } else {
        text
    }
}

/// Numeric-or-default coercion: numbers and numeric strings pass, anything
/// else (including NaN and infinities) becomes 0.
fn numeric_or_zero(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

fn non_negative(value: Option<&Value>) -> f64 {
    numeric_or_zero(value).max(0.0)
}

fn timestamp_or(value: Option<&Value>, now: DateTime<Utc>) -> String {
    value
        .and_then(parse_timestamp)
        .unwrap_or(now)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_text(s.trim()),
        Value::Number(n) => {
            let epoch = n.as_f64().filter(|v| v.is_finite())?;
            if epoch.abs() > EPOCH_MILLIS_THRESHOLD {
                DateTime::from_timestamp_millis(epoch as i64)
            } else {
                DateTime::from_timestamp(epoch as i64, 0)
            }
        }
        _ => None,
    }
}

fn parse_timestamp_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}
