//! Built-in fallback values for configuration fields left unset.

use crate::config::types::{BackendConfig, RefreshConfig};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_ENDPOINT: &str = "/api/machine-data";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_INTERVAL_SECS: u64 = 10;

impl BackendConfig {
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_BACKEND_URL)
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Token to send, ignoring a blank value.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

impl RefreshConfig {
    pub fn interval_secs(&self) -> u64 {
        self.interval_secs.unwrap_or(DEFAULT_INTERVAL_SECS)
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_defaults() {
        let backend = BackendConfig::default();
        assert_eq!(backend.url(), "http://localhost:5000");
        assert_eq!(backend.endpoint(), "/api/machine-data");
        assert_eq!(backend.token(), None);
        assert_eq!(backend.timeout_secs(), 10);

        let refresh = RefreshConfig::default();
        assert_eq!(refresh.interval_secs(), 10);
        assert!(refresh.auto_refresh());
    }

    #[test]
    fn test_blank_token_is_treated_as_unset() {
        let backend = BackendConfig {
            token: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(backend.token(), None);
    }

    #[test]
    fn test_explicit_values_win() {
        let refresh = RefreshConfig {
            interval_secs: Some(300),
            auto_refresh: Some(false),
        };
        assert_eq!(refresh.interval_secs(), 300);
        assert!(!refresh.auto_refresh());
    }
}
