use clap::ArgMatches;
use serde::Serialize;
use tracing::{error, info};

use linewatch_core::scheduler::{ApplyOutcome, ManualTimer};
use linewatch_core::{
    DashboardSession, FacetOptions, MachineRecord, SummaryStats, TelemetrySource,
};

use super::helpers;
use crate::source::HttpTelemetrySource;
use crate::table::{self, TableFormatter};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotOutput<'a> {
    summary: &'a SummaryStats,
    facets: &'a FacetOptions,
    records: Vec<&'a MachineRecord>,
}

pub(crate) async fn handle_snapshot_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = helpers::load_config(matches)?;
    let spec = helpers::filter_from_matches(matches);
    let json_output = matches.get_flag("json");

    info!(
        event = "cli.snapshot_started",
        url = config.backend.url(),
        device = %spec.device
    );

    let source = HttpTelemetrySource::from_config(&config.backend)?;

    // One-shot: the timer is never armed
    let mut session = DashboardSession::new(ManualTimer::new(), config.refresh.interval_secs())?;
    let request = session.refresh_now(spec.device.clone());
    let result = source.fetch(&request.device).await;

    if let ApplyOutcome::Failed { error, .. } = session.complete(request, result) {
        error!(event = "cli.snapshot_failed", error = %error);
        return Err(error.into());
    }
    session.set_filter(spec);

    let snapshot = session.snapshot();
    let visible = session.visible();
    let facets = session.facet_options();

    if json_output {
        let output = SnapshotOutput {
            summary: &snapshot.summary,
            facets: &facets,
            records: visible,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in table::render_summary(&snapshot.summary) {
            println!("{line}");
        }
        println!();
        for line in table::render_facets(&facets) {
            println!("{line}");
        }
        println!();
        if visible.is_empty() {
            println!("No records match the current filters.");
        } else {
            TableFormatter::new(&visible).print_table(&visible);
        }
    }

    info!(
        event = "cli.snapshot_completed",
        records = snapshot.records.len()
    );
    Ok(())
}
