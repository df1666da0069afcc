//! Ethereum network and transaction settings.

use serde::Deserialize;

/// Wyvern exchange contract used by OpenSea on mainnet.
pub const WYVERN_EXCHANGE_MAINNET: &str = "0x7be8076f4ea4a4ad08075c2508e481d6c946d12b";

/// Chain and transaction parameters for purchase submission.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// JSON-RPC base URL; the project id is appended to it.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Exchange contract that receives the match call.
    #[serde(default = "default_exchange_address")]
    pub exchange_address: String,
    /// Chain ID for transaction signing.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Gas limit for the purchase transaction.
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
    /// How far in the past the buy order's listing time is set, in seconds.
    #[serde(default = "default_listing_time_backdate_secs")]
    pub listing_time_backdate_secs: u64,
}

fn default_rpc_url() -> String {
    "https://mainnet.infura.io/v3/".into()
}

fn default_exchange_address() -> String {
    WYVERN_EXCHANGE_MAINNET.into()
}

const fn default_chain_id() -> u64 {
    1
}

const fn default_gas_limit() -> u64 {
    250_000
}

const fn default_listing_time_backdate_secs() -> u64 {
    180
}

impl ChainConfig {
    /// Full RPC endpoint for the given project id.
    #[must_use]
    pub fn rpc_endpoint(&self, project_id: &str) -> String {
        format!("{}{}", self.rpc_url, project_id)
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            exchange_address: default_exchange_address(),
            chain_id: default_chain_id(),
            gas_limit: default_gas_limit(),
            listing_time_backdate_secs: default_listing_time_backdate_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_endpoint_appends_project_id() {
        let config = ChainConfig::default();
        assert_eq!(
            config.rpc_endpoint("abc123"),
            "https://mainnet.infura.io/v3/abc123"
        );
    }

    #[test]
    fn defaults_target_mainnet_wyvern() {
        let config = ChainConfig::default();
        assert_eq!(config.chain_id, 1);
        assert_eq!(config.exchange_address, WYVERN_EXCHANGE_MAINNET);
        assert_eq!(config.gas_limit, 250_000);
    }
}
