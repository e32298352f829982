//! Configuration loading and merging.
//!
//! Later sources override earlier ones:
//! 1. **Built-in defaults**
//! 2. **User config** - `~/.linewatch/config.toml`
//! 3. **Project config** - `./.linewatch/config.toml`
//! 4. **CLI arguments** - applied by the binary on top of the result

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::{BackendConfig, LinewatchConfig, RefreshConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".linewatch";
const CONFIG_FILE: &str = "config.toml";

/// Load and validate configuration from the user and project files.
///
/// # Errors
///
/// Fails on unreadable or unparsable files and on validation errors.
/// Missing files are skipped.
pub fn load_hierarchy() -> Result<LinewatchConfig, ConfigError> {
    let config = load_layers()?;
    validate_config(&config)?;
    Ok(config)
}

/// Merge the user and project files without validating.
///
/// For callers that layer further overrides on top and validate the
/// final result themselves.
pub fn load_layers() -> Result<LinewatchConfig, ConfigError> {
    let user = user_config_path();
    let project = project_config_path()?;
    load_layers_from(user.as_deref(), Some(&project))
}

/// [`load_hierarchy`] with explicit file locations.
pub fn load_hierarchy_from(
    user: Option<&Path>,
    project: Option<&Path>,
) -> Result<LinewatchConfig, ConfigError> {
    let config = load_layers_from(user, project)?;
    validate_config(&config)?;
    Ok(config)
}

/// [`load_layers`] with explicit file locations.
pub fn load_layers_from(
    user: Option<&Path>,
    project: Option<&Path>,
) -> Result<LinewatchConfig, ConfigError> {
    let mut config = LinewatchConfig::default();

    for path in [user, project].into_iter().flatten() {
        match load_config_file(path) {
            Ok(layer) => config = merge_configs(config, layer),
            Err(ConfigError::ConfigNotFound { path }) => {
                debug!(event = "core.config.file_skipped", path = %path);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(config)
}

/// `~/.linewatch/config.toml`, if a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// `./.linewatch/config.toml` relative to the working directory.
pub fn project_config_path() -> Result<PathBuf, ConfigError> {
    Ok(std::env::current_dir()?.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Parse one config file without validating it.
pub fn load_config_file(path: &Path) -> Result<LinewatchConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Merge two configurations; fields set in `override_config` win.
pub fn merge_configs(base: LinewatchConfig, override_config: LinewatchConfig) -> LinewatchConfig {
    LinewatchConfig {
        backend: BackendConfig {
            url: override_config.backend.url.or(base.backend.url),
            endpoint: override_config.backend.endpoint.or(base.backend.endpoint),
            token: override_config.backend.token.or(base.backend.token),
            timeout_secs: override_config
                .backend
                .timeout_secs
                .or(base.backend.timeout_secs),
        },
        refresh: RefreshConfig {
            interval_secs: override_config
                .refresh
                .interval_secs
                .or(base.refresh.interval_secs),
            auto_refresh: override_config
                .refresh
                .auto_refresh
                .or(base.refresh.auto_refresh),
        },
    }
}
