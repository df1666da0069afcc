//! Decision loop timing and unit settings.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::port::EventKind;

/// Polling cadence and price conversion settings for the decision loop.
#[derive(Debug, Clone, Deserialize)]
pub struct SniperConfig {
    /// Sleep between polling cycles in seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Age the floor price must exceed before it is refreshed, in seconds.
    #[serde(default = "default_floor_refresh_secs")]
    pub floor_refresh_secs: u64,
    /// Width of the listing event window queried each cycle, in seconds.
    #[serde(default = "default_lookback_secs")]
    pub lookback_secs: u64,
    /// Decimals of the listing currency (18 for ETH).
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u32,
    /// Marketplace event type to poll for.
    #[serde(default = "default_event_type")]
    pub event_type: String,
}

const fn default_poll_interval_secs() -> u64 {
    3
}

const fn default_floor_refresh_secs() -> u64 {
    60
}

const fn default_lookback_secs() -> u64 {
    30
}

const fn default_currency_decimals() -> u32 {
    18
}

fn default_event_type() -> String {
    "created".into()
}

impl SniperConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    #[must_use]
    pub fn floor_refresh(&self) -> Duration {
        Duration::from_secs(self.floor_refresh_secs)
    }

    #[must_use]
    pub fn lookback(&self) -> Duration {
        Duration::from_secs(self.lookback_secs)
    }

    /// Parsed `event_type`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unknown event type.
    #[allow(clippy::result_large_err)]
    pub fn event_kind(&self) -> Result<EventKind> {
        self.event_type.parse::<EventKind>().map_err(|reason| {
            ConfigError::InvalidValue {
                field: "event_type",
                reason,
            }
            .into()
        })
    }
}

impl Default for SniperConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            floor_refresh_secs: default_floor_refresh_secs(),
            lookback_secs: default_lookback_secs(),
            currency_decimals: default_currency_decimals(),
            event_type: default_event_type(),
        }
    }
}
