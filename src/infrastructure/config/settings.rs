//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Tunables come from an optional TOML file; the account, collection and
//! trading threshold always come from environment variables (see
//! [`Credentials`]).
//!
//! # Example
//!
//! ```no_run
//! use floorsniper::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_optional("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use std::path::Path;

use super::credentials::Credentials;
use super::logging::LoggingConfig;
use super::sniper::SniperConfig;
use crate::adapter::outbound::ethereum::settings::ChainConfig;
use crate::adapter::outbound::opensea::settings::OpenSeaConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Marketplace API settings.
    #[serde(default, alias = "opensea")]
    pub marketplace: OpenSeaConfig,

    /// Network and transaction settings.
    #[serde(default)]
    pub chain: ChainConfig,

    /// Decision loop cadence.
    #[serde(default)]
    pub sniper: SniperConfig,

    /// Enable dry-run mode.
    ///
    /// When true, underpriced listings are logged but never bought.
    #[serde(default)]
    pub dry_run: bool,

    /// Loaded from the environment after parsing, never from the file.
    #[serde(skip)]
    pub credentials: Credentials,
}

impl Config {
    /// Parse configuration from TOML content and read credentials from the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed, a required
    /// environment variable is unset, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with(content, |key| std::env::var(key).ok())
    }

    /// Like [`Config::parse_toml`] with an injected environment lookup.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.credentials = Credentials::from_lookup(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`Config::parse_toml`]
    /// fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`] with an injected environment lookup.
    #[allow(clippy::result_large_err)]
    pub fn load_with<P, F>(path: P, lookup: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml_with(&content, lookup)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    ///
    /// Credentials are required either way.
    #[allow(clippy::result_large_err)]
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.marketplace.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if self.chain.rpc_url.is_empty() {
            return Err(ConfigError::MissingField { field: "rpc_url" }.into());
        }
        if self.marketplace.events_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "events_page_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.marketplace.orders_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "orders_page_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.marketplace.max_pages == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_pages",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.sniper.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.sniper.lookback_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "lookback_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.sniper.currency_decimals > 28 {
            return Err(ConfigError::InvalidValue {
                field: "currency_decimals",
                reason: "must be at most 28".to_string(),
            }
            .into());
        }
        if self.chain.gas_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gas_limit",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        self.sniper.event_kind()?;
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
