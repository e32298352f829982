//! Lifecycle events for one CLI invocation.

use tracing::{error, info};

/// A subcommand began; records which one and the build version.
pub fn log_command_started(command: &str) {
    info!(
        event = "core.app.command_started",
        command = command,
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_command_finished(command: &str, succeeded: bool) {
    info!(
        event = "core.app.command_finished",
        command = command,
        succeeded = succeeded
    );
}

pub fn log_command_failed(command: &str, error: &dyn std::error::Error) {
    error!(
        event = "core.app.command_failed",
        command = command,
        error = %error,
        error_type = std::any::type_name_of_val(error)
    );
}
