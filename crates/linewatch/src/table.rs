use linewatch_core::{FacetOptions, MachineRecord, SummaryStats};

/// Column layout for the record table.
pub struct TableFormatter {
    device_width: usize,
    timestamp_width: usize,
    shift_width: usize,
    design_width: usize,
    count_width: usize,
    efficiency_width: usize,
    status_width: usize,
    error_width: usize,
}

impl TableFormatter {
    pub fn new(records: &[&MachineRecord]) -> Self {
        let device_width = column_width(records.iter().map(|r| r.device_id.as_str()), "Device");
        let shift_width = column_width(records.iter().map(|r| r.shift.as_str()), "Shift");
        let design_width = column_width(records.iter().map(|r| r.design.as_str()), "Design");

        Self {
            device_width,
            timestamp_width: 19,
            shift_width,
            design_width,
            count_width: 10,
            efficiency_width: 6,
            status_width: 11,
            error_width: 7,
        }
    }

    pub fn print_table(&self, records: &[&MachineRecord]) {
        for line in self.render(records) {
            println!("{line}");
        }
    }

    pub fn render(&self, records: &[&MachineRecord]) -> Vec<String> {
        let mut lines = Vec::with_capacity(records.len() + 4);
        lines.push(self.border('┌', '┬', '┐'));
        lines.push(self.row([
            "Device",
            "Timestamp",
            "Shift",
            "Design",
            "Count",
            "Eff %",
            "Status",
            "Error 1",
            "Error 2",
        ]));
        lines.push(self.border('├', '┼', '┤'));
        for record in records {
            let count = format_number(record.count);
            let efficiency = format!("{:.1}", record.efficiency);
            let error1 = format_number(record.error1);
            let error2 = format_number(record.error2);
            lines.push(self.row([
                &record.device_id,
                &record.timestamp,
                &record.shift,
                &record.design,
                &count,
                &efficiency,
                record.status.as_str(),
                &error1,
                &error2,
            ]));
        }
        lines.push(self.border('└', '┴', '┘'));
        lines
    }

    fn widths(&self) -> [usize; 9] {
        [
            self.device_width,
            self.timestamp_width,
            self.shift_width,
            self.design_width,
            self.count_width,
            self.efficiency_width,
            self.status_width,
            self.error_width,
            self.error_width,
        ]
    }

    fn row(&self, cells: [&str; 9]) -> String {
        let cells: Vec<String> = cells
            .iter()
            .zip(self.widths())
            .map(|(cell, width)| truncate(cell, width))
            .collect();
        format!("│ {} │", cells.join(" │ "))
    }

    fn border(&self, left: char, middle: char, right: char) -> String {
        let segments: Vec<String> = self
            .widths()
            .iter()
            .map(|width| "─".repeat(width + 2))
            .collect();
        format!("{left}{}{right}", segments.join(&middle.to_string()))
    }
}

/// Summary cards shown above the table.
pub fn render_summary(summary: &SummaryStats) -> Vec<String> {
    let status = &summary.status_summary;
    vec![
        format!(
            "Production: {}   Avg efficiency: {:.1}%   Errors: {} (E1 {}, E2 {})",
            format_number(summary.total_production),
            summary.avg_efficiency,
            format_number(summary.total_errors),
            format_number(summary.error1_count),
            format_number(summary.error2_count),
        ),
        format!(
            "Machines: {}   running {}   idle {}   stopped {}   maintenance {}",
            status.total, status.running, status.idle, status.stopped, status.maintenance,
        ),
    ]
}

/// One line per facet listing its selectable values.
pub fn render_facets(facets: &FacetOptions) -> Vec<String> {
    vec![
        format!("Devices: {}", join_or_none(&facets.devices)),
        format!("Shifts:  {}", join_or_none(&facets.shifts)),
        format!("Designs: {}", join_or_none(&facets.designs)),
    ]
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
        .min(30)
}

/// Whole numbers print without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Counts characters, not bytes.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linewatch_core::StatusTag;
    use linewatch_core::summary::StatusSummary;

    fn record(device: &str) -> MachineRecord {
        MachineRecord {
            device_id: device.to_string(),
            timestamp: "2024-05-01 08:30:00".to_string(),
            shift: "A".to_string(),
            design: "X".to_string(),
            count: 100.0,
            efficiency: 87.25,
            error1: 1.0,
            error2: 0.5,
            status: StatusTag::Running,
        }
    }

    #[test]
    fn test_truncate_pads_short_strings() {
        assert_eq!(truncate("ab", 4), "ab  ");
    }

    #[test]
    fn test_truncate_long_strings() {
        assert_eq!(truncate("abcdefgh", 6), "abc...");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(0.5), "0.50");
    }

    #[test]
    fn test_table_rows_align() {
        let records = [record("M1"), record("LONG-DEVICE-9")];
        let refs: Vec<&MachineRecord> = records.iter().collect();
        let lines = TableFormatter::new(&refs).render(&refs);

        assert_eq!(lines.len(), 6);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
        assert!(lines[3].contains("M1"));
        assert!(lines[3].contains("running"));
        assert!(lines[3].contains("87.2") || lines[3].contains("87.3"));
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let lines = TableFormatter::new(&[]).render(&[]);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("Device"));
    }

    #[test]
    fn test_summary_cards() {
        let summary = SummaryStats {
            total_production: 300.0,
            avg_efficiency: 87.5,
            total_errors: 4.0,
            error1_count: 3.0,
            error2_count: 1.0,
            status_summary: StatusSummary {
                total: 2,
                running: 1,
                idle: 1,
                stopped: 0,
                maintenance: 0,
            },
            designs: vec!["X".to_string()],
        };
        let lines = render_summary(&summary);

        assert_eq!(
            lines[0],
            "Production: 300   Avg efficiency: 87.5%   Errors: 4 (E1 3, E2 1)"
        );
        assert!(lines[1].starts_with("Machines: 2"));
    }

    #[test]
    fn test_facets_render_none_when_empty() {
        let lines = render_facets(&FacetOptions::default());
        assert_eq!(lines[0], "Devices: (none)");
    }
}
