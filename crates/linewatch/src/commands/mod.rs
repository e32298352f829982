use clap::ArgMatches;
use tracing::error;

use linewatch_core::events;

pub mod helpers;

mod config;
mod snapshot;
mod watch;

pub async fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let command = matches.subcommand_name().unwrap_or("none");
    events::log_command_started(command);

    let result = match matches.subcommand() {
        Some(("snapshot", sub_matches)) => snapshot::handle_snapshot_command(sub_matches).await,
        Some(("watch", sub_matches)) => watch::handle_watch_command(sub_matches).await,
        Some(("config", sub_matches)) => config::handle_config_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    if let Err(e) = &result {
        events::log_command_failed(command, e.as_ref());
    }
    events::log_command_finished(command, result.is_ok());

    result
}
