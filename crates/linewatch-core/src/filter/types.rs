use std::fmt;

use serde::{Serialize, Serializer};

use crate::telemetry::{MachineRecord, StatusTag};

/// Sentinel accepted wherever a facet selection is parsed from text.
pub const ALL: &str = "all";

/// Status facet choices offered to presentation. Closed, unlike the other
/// facets which are derived from the data.
pub const STATUS_FACET_OPTIONS: [&str; 5] = [ALL, "running", "idle", "stopped", "maintenance"];

/// One facet selection: everything, or exactly one value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FacetValue<T> {
    All,
    Only(T),
}

impl<T> Default for FacetValue<T> {
    fn default() -> Self {
        FacetValue::All
    }
}

impl<T: PartialEq> FacetValue<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, FacetValue::All)
    }

    /// Whether `value` passes this selection.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            FacetValue::All => true,
            FacetValue::Only(selected) => selected == value,
        }
    }
}

impl FacetValue<String> {
    /// Parse a text selection. Only the exact lowercase `"all"` is the
    /// sentinel, so a device, shift or design named `All` stays selectable.
    pub fn parse(text: &str) -> Self {
        if text == ALL {
            FacetValue::All
        } else {
            FacetValue::Only(text.to_string())
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            FacetValue::All => None,
            FacetValue::Only(value) => Some(value.as_str()),
        }
    }
}

impl FacetValue<StatusTag> {
    /// Parse a status selection through the same mapping the normalizer uses,
    /// so `"RUNNING"` selects records normalized to `running`.
    pub fn parse_status(text: &str) -> Self {
        if text.trim().eq_ignore_ascii_case(ALL) {
            FacetValue::All
        } else {
            FacetValue::Only(StatusTag::from_raw(text))
        }
    }
}

impl<T: fmt::Display> fmt::Display for FacetValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetValue::All => f.write_str(ALL),
            FacetValue::Only(value) => value.fmt(f),
        }
    }
}

impl<T: Serialize> Serialize for FacetValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FacetValue::All => serializer.serialize_str(ALL),
            FacetValue::Only(value) => value.serialize(serializer),
        }
    }
}

/// Device scope of an ingestion request and of the device facet.
pub type DeviceSelection = FacetValue<String>;

/// The four independent facet selections. Facets combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub device: DeviceSelection,
    pub shift: FacetValue<String>,
    pub design: FacetValue<String>,
    pub status: FacetValue<StatusTag>,
}

impl FilterSpec {
    pub fn with_device(mut self, device: DeviceSelection) -> Self {
        self.device = device;
        self
    }

    pub fn with_shift(mut self, shift: FacetValue<String>) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_design(mut self, design: FacetValue<String>) -> Self {
        self.design = design;
        self
    }

    pub fn with_status(mut self, status: FacetValue<StatusTag>) -> Self {
        self.status = status;
        self
    }

    /// Exact, case-sensitive match on every facet that is not `All`.
    pub fn matches(&self, record: &MachineRecord) -> bool {
        self.device.admits(&record.device_id)
            && self.shift.admits(&record.shift)
            && self.design.admits(&record.design)
            && self.status.admits(&record.status)
    }
}

/// A filterable dimension of [`MachineRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Device,
    Shift,
    Design,
    Status,
}

impl Facet {
    pub fn value_of<'a>(&self, record: &'a MachineRecord) -> &'a str {
        match self {
            Facet::Device => record.device_id.as_str(),
            Facet::Shift => record.shift.as_str(),
            Facet::Design => record.design.as_str(),
            Facet::Status => record.status.as_str(),
        }
    }
}

/// Choices for each facet, derived from the unfiltered snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub devices: Vec<String>,
    pub shifts: Vec<String>,
    pub designs: Vec<String>,
    pub statuses: Vec<String>,
}

impl Default for FacetOptions {
    fn default() -> Self {
        Self {
            devices: Vec::new(),
            shifts: Vec::new(),
            designs: Vec::new(),
            statuses: STATUS_FACET_OPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_value_parse_sentinel_is_exact() {
        assert_eq!(FacetValue::parse("all"), FacetValue::All);
        assert_eq!(FacetValue::parse("ALL"), FacetValue::Only("ALL".to_string()));
        assert_eq!(FacetValue::parse("All"), FacetValue::Only("All".to_string()));
        assert_eq!(FacetValue::parse("D1"), FacetValue::Only("D1".to_string()));
    }

    #[test]
    fn test_status_selection_uses_normalized_tag() {
        assert_eq!(
            FacetValue::parse_status("Running"),
            FacetValue::Only(StatusTag::Running)
        );
        assert_eq!(FacetValue::parse_status("all"), FacetValue::All);
    }

    #[test]
    fn test_facet_value_serializes_as_text() {
        let spec = FilterSpec::default().with_status(FacetValue::Only(StatusTag::Idle));
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["device"], "all");
        assert_eq!(json["status"], "idle");
    }

    #[test]
    fn test_default_status_options() {
        let options = FacetOptions::default();
        assert_eq!(
            options.statuses,
            vec!["all", "running", "idle", "stopped", "maintenance"]
        );
    }
}
