use std::collections::HashSet;

use crate::filter::types::{Facet, FacetOptions, FilterSpec};
use crate::telemetry::MachineRecord;

/// Stable filter: records passing every selected facet, in original order.
pub fn filter_records<'a>(
    records: &'a [MachineRecord],
    spec: &FilterSpec,
) -> Vec<&'a MachineRecord> {
    records.iter().filter(|record| spec.matches(record)).collect()
}

/// Distinct values of `facet`, in order of first occurrence.
pub fn distinct_values(records: &[MachineRecord], facet: Facet) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|record| facet.value_of(record))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

impl FacetOptions {
    /// Build every facet's choices from an unfiltered snapshot.
    ///
    /// Independent of any active [`FilterSpec`]: selecting one facet never
    /// narrows another facet's choices.
    pub fn from_records(records: &[MachineRecord]) -> Self {
        Self {
            devices: distinct_values(records, Facet::Device),
            shifts: distinct_values(records, Facet::Shift),
            designs: distinct_values(records, Facet::Design),
            ..Self::default()
        }
    }
}
