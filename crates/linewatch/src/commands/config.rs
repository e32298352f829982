use clap::ArgMatches;
use tracing::info;

use super::helpers;

pub(crate) fn handle_config_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = helpers::load_config(matches)?;

    info!(event = "cli.config_completed");

    // Print resolved values, not just the ones set in files
    let mut effective = config.clone();
    effective.backend.url = Some(config.backend.url().to_string());
    effective.backend.endpoint = Some(config.backend.endpoint().to_string());
    effective.backend.token = config.backend.token().map(|_| "<redacted>".to_string());
    effective.backend.timeout_secs = Some(config.backend.timeout_secs());
    effective.refresh.interval_secs = Some(config.refresh.interval_secs());
    effective.refresh.auto_refresh = Some(config.refresh.auto_refresh());

    print!("{}", toml::to_string_pretty(&effective)?);
    Ok(())
}
