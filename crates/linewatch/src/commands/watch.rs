use std::io::IsTerminal;
use std::sync::Arc;

use clap::ArgMatches;
use tracing::{debug, info, warn};

use linewatch_core::{DashboardSnapshot, DashboardView, spawn_dashboard_with_filter};

use super::helpers;
use crate::source::HttpTelemetrySource;
use crate::table::{self, TableFormatter};

pub(crate) async fn handle_watch_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = helpers::load_config(matches)?;
    let spec = helpers::filter_from_matches(matches);
    let interval_secs = config.refresh.interval_secs();
    let auto_refresh = config.refresh.auto_refresh();

    info!(
        event = "cli.watch_started",
        url = config.backend.url(),
        interval_secs = interval_secs,
        auto_refresh = auto_refresh
    );

    let source = HttpTelemetrySource::from_config(&config.backend)?;
    // The session starts scoped to the selected device, so the first
    // start or refresh is the only launch fetch
    let (handle, task) = spawn_dashboard_with_filter(source, interval_secs, spec)?;
    let mut views = handle.subscribe();

    if auto_refresh {
        handle.start(interval_secs)?;
    } else {
        handle.refresh()?;
    }

    let clear_screen = std::io::stdout().is_terminal();
    let mut rendered = RenderState::default();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    warn!(event = "cli.watch_loop_closed");
                    break;
                }
                let view = views.borrow_and_update().clone();
                if rendered.needs_render(&view) {
                    if clear_screen {
                        print!("\x1b[2J\x1b[H");
                    }
                    for line in render_view(&view) {
                        println!("{line}");
                    }
                    rendered.record(&view);
                }
            }
            _ = &mut ctrl_c => {
                info!(event = "cli.watch_interrupted");
                break;
            }
        }
    }

    if let Err(e) = handle.shutdown() {
        debug!(event = "cli.watch_shutdown_skipped", error = %e);
    }
    task.await?;

    info!(event = "cli.watch_completed");
    Ok(())
}

/// What was last drawn, so unchanged views are not redrawn.
#[derive(Default)]
struct RenderState {
    snapshot: Option<Arc<DashboardSnapshot>>,
    notice: Option<String>,
}

impl RenderState {
    fn needs_render(&self, view: &DashboardView) -> bool {
        let Some(last) = &self.snapshot else {
            return view.snapshot.fetched_at.is_some() || view.notice.is_some();
        };
        !Arc::ptr_eq(last, &view.snapshot) || self.notice != view.notice
    }

    fn record(&mut self, view: &DashboardView) {
        self.snapshot = Some(Arc::clone(&view.snapshot));
        self.notice = view.notice.clone();
    }
}

fn render_view(view: &DashboardView) -> Vec<String> {
    let snapshot = &view.snapshot;
    let fetched = snapshot.fetched_at.map_or_else(
        || "never".to_string(),
        |at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );

    let mut lines = vec![format!(
        "LINEWATCH | {} | device {} | last update {}",
        view.state, view.filter.device, fetched
    )];
    if let Some(notice) = &view.notice {
        lines.push(format!("! {notice}"));
    }
    lines.push(String::new());
    lines.extend(table::render_summary(&snapshot.summary));
    lines.push(String::new());
    lines.extend(table::render_facets(&view.facets));
    lines.push(String::new());

    let visible: Vec<_> = view.visible.iter().collect();
    if visible.is_empty() {
        lines.push("No records match the current filters.".to_string());
    } else {
        lines.extend(TableFormatter::new(&visible).render(&visible));
    }
    lines
}
