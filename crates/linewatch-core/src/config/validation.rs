use crate::config::types::LinewatchConfig;
use crate::errors::ConfigError;

/// Refresh intervals a user may pick, in seconds.
pub const ALLOWED_INTERVALS: [u64; 5] = [3, 10, 30, 60, 300];

pub fn validate_interval(interval_secs: u64) -> Result<(), ConfigError> {
    if ALLOWED_INTERVALS.contains(&interval_secs) {
        Ok(())
    } else {
        Err(ConfigError::InvalidInterval { interval_secs })
    }
}

/// Validate the merged configuration.
///
/// # Errors
///
/// Returns `InvalidInterval` for an interval outside [`ALLOWED_INTERVALS`]
/// and `InvalidConfiguration` for an empty backend URL or a zero timeout.
pub fn validate_config(config: &LinewatchConfig) -> Result<(), ConfigError> {
    validate_interval(config.refresh.interval_secs())?;

    if config.backend.url().trim().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "backend.url must not be empty".to_string(),
        });
    }

    if config.backend.timeout_secs() == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "backend.timeout_secs must be greater than zero".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&LinewatchConfig::default()).is_ok());
    }

    #[test]
    fn test_every_allowed_interval_passes() {
        for interval in ALLOWED_INTERVALS {
            assert!(validate_interval(interval).is_ok(), "{interval}");
        }
    }

    #[test]
    fn test_interval_outside_set_rejected() {
        let mut config = LinewatchConfig::default();
        config.refresh.interval_secs = Some(5);

        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInterval { interval_secs: 5 }));
    }

    #[test]
    fn test_empty_url_rejected() {
        let mut config = LinewatchConfig::default();
        config.backend.url = Some("  ".to_string());

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("backend.url"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = LinewatchConfig::default();
        config.backend.timeout_secs = Some(0);

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }
}
