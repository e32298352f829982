use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::dashboard::{DashboardSession, DashboardView};
use crate::filter::FilterSpec;
use crate::ingest::{IngestError, IngestRequest, TelemetryEnvelope, TelemetrySource};
use crate::runtime::errors::DashboardError;
use crate::runtime::handle::{DashboardCommand, DashboardHandle};
use crate::scheduler::{ApplyOutcome, TimerId, TokioTimer};

type Completion = (IngestRequest, Result<TelemetryEnvelope, IngestError>);

/// Start a dashboard event loop on the current tokio runtime.
///
/// The loop is the only owner of the session. Fetches run as separate
/// tasks and report back through a channel, so the loop stays free to
/// handle `stop`, interval changes and manual refreshes while a fetch is
/// in flight. The loop ends on [`DashboardHandle::shutdown`] or once every
/// handle is dropped.
pub fn spawn_dashboard<S: TelemetrySource>(
    source: S,
    interval_secs: u64,
) -> Result<(DashboardHandle, JoinHandle<()>), DashboardError> {
    spawn_dashboard_with_filter(source, interval_secs, FilterSpec::default())
}

/// [`spawn_dashboard`] with an initial facet selection.
///
/// Nothing is fetched until the first command; a following `start` or
/// `refresh` is already scoped to the selected device.
pub fn spawn_dashboard_with_filter<S: TelemetrySource>(
    source: S,
    interval_secs: u64,
    filter: FilterSpec,
) -> Result<(DashboardHandle, JoinHandle<()>), DashboardError> {
    let (timer, ticks) = TokioTimer::new();
    let session = DashboardSession::new(timer, interval_secs)?.with_filter(filter);

    let (commands_tx, commands) = mpsc::unbounded_channel();
    let (completions_tx, completions) = mpsc::unbounded_channel();
    let (view_tx, view_rx) = watch::channel(session.view(0));

    let event_loop = EventLoop {
        session,
        source: Arc::new(source),
        commands,
        ticks,
        completions,
        completions_tx,
        view: view_tx,
        revision: 0,
    };
    let task = tokio::spawn(event_loop.run());

    Ok((DashboardHandle::new(commands_tx, view_rx), task))
}

struct EventLoop<S: TelemetrySource> {
    session: DashboardSession<TokioTimer>,
    source: Arc<S>,
    commands: mpsc::UnboundedReceiver<DashboardCommand>,
    ticks: mpsc::UnboundedReceiver<TimerId>,
    completions: mpsc::UnboundedReceiver<Completion>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    view: watch::Sender<DashboardView>,
    revision: u64,
}

impl<S: TelemetrySource> EventLoop<S> {
    async fn run(mut self) {
        info!(event = "core.runtime.loop_started");

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(DashboardCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                Some(timer_id) = self.ticks.recv() => {
                    if let Some(request) = self.session.tick(timer_id) {
                        self.dispatch(request);
                    }
                }
                Some((request, result)) = self.completions.recv() => {
                    let outcome = self.session.complete(request, result);
                    if !matches!(outcome, ApplyOutcome::Discarded { .. }) {
                        self.publish();
                    }
                }
            }
        }

        self.session.stop();
        self.publish();
        info!(event = "core.runtime.loop_stopped");
    }

    fn handle_command(&mut self, command: DashboardCommand) {
        debug!(event = "core.runtime.command_received", command = ?command);

        match command {
            DashboardCommand::Start { interval_secs } => match self.session.start(interval_secs) {
                Ok(request) => self.dispatch(request),
                Err(e) => warn!(event = "core.runtime.start_rejected", error = %e),
            },
            DashboardCommand::Stop => self.session.stop(),
            DashboardCommand::SetInterval { interval_secs } => {
                if let Err(e) = self.session.set_interval(interval_secs) {
                    warn!(event = "core.runtime.interval_rejected", error = %e);
                }
            }
            DashboardCommand::Refresh => {
                let request = self.session.refresh();
                self.dispatch(request);
            }
            DashboardCommand::RefreshNow { device } => {
                let request = self.session.refresh_now(device);
                self.dispatch(request);
            }
            DashboardCommand::SetFilter(spec) => {
                if let Some(request) = self.session.set_filter(spec) {
                    self.dispatch(request);
                }
            }
            DashboardCommand::Shutdown => {}
        }

        self.publish();
    }

    fn dispatch(&self, request: IngestRequest) {
        let source = Arc::clone(&self.source);
        let completions = self.completions_tx.clone();

        tokio::spawn(async move {
            let result = source.fetch(&request.device).await;
            // Receiver gone means the loop has shut down; nothing to apply.
            let _ = completions.send((request, result));
        });
    }

    fn publish(&mut self) {
        self.revision += 1;
        self.view.send_replace(self.session.view(self.revision));
    }
}
