//! # Configuration System
//!
//! Hierarchical TOML configuration for the dashboard.
//!
//! ```toml
//! # ~/.linewatch/config.toml
//! [backend]
//! url = "http://localhost:5000"
//! endpoint = "/api/machine-data"
//! timeout_secs = 10
//!
//! [refresh]
//! interval_secs = 10
//! auto_refresh = true
//! ```
//!
//! ```rust,no_run
//! use linewatch_core::config::LinewatchConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LinewatchConfig::load_hierarchy()?;
//!     println!("polling {}", config.backend.url());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{BackendConfig, LinewatchConfig, RefreshConfig};
pub use validation::{ALLOWED_INTERVALS, validate_config, validate_interval};

impl LinewatchConfig {
    /// See [`loading::load_hierarchy`].
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// See [`validation::validate_config`].
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
