//! OpenSea API configuration.

use serde::Deserialize;

/// OpenSea REST API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenSeaConfig {
    /// API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Page size for the events endpoint.
    #[serde(default = "default_events_page_size")]
    pub events_page_size: usize,
    /// Page size for the orders endpoint.
    #[serde(default = "default_orders_page_size")]
    pub orders_page_size: usize,
    /// Upper bound on pages fetched by a single call.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_api_url() -> String {
    "https://api.opensea.io".into()
}

const fn default_events_page_size() -> usize {
    300
}

const fn default_orders_page_size() -> usize {
    50
}

const fn default_max_pages() -> usize {
    100
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl Default for OpenSeaConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            events_page_size: default_events_page_size(),
            orders_page_size: default_orders_page_size(),
            max_pages: default_max_pages(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}
