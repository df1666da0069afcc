//! Purchase submission over Ethereum JSON-RPC.
//!
//! Signs an `atomicMatch_` call with the local wallet key and broadcasts it
//! without waiting for inclusion. Nonces are read from the chain until the
//! first successful broadcast, then tracked locally.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::{Address, U256};
use alloy_provider::network::EthereumWallet;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer::Signer as _;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, error, info};

use super::settings::ChainConfig;
use super::wyvern::{build_atomic_match, BuyParams, WyvernExchange};
use crate::domain::{NonceCounter, Order, Wei};
use crate::error::{ConfigError, ExecutionError, Result};
use crate::infrastructure::config::credentials::{
    Credentials, CONTRACT_ADDRESS, GAS_PRICE, PRIVATE_KEY_HEX, WALLET_ADDRESS,
};
use crate::port::{PurchaseSubmitter, SubmitOutcome};

/// Decimal places between gwei and wei.
const GWEI_DECIMALS: u32 = 9;

/// Submits purchases to the Wyvern exchange from a single wallet.
pub struct EthereumSubmitter {
    signer: PrivateKeySigner,
    rpc_url: url::Url,
    exchange: Address,
    nft_contract: Address,
    gas_limit: u64,
    gas_price_wei: u128,
    listing_time_backdate_secs: u64,
    nonce: Mutex<NonceCounter>,
}

impl EthereumSubmitter {
    /// Create a submitter from chain settings and wallet credentials.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the key, addresses, gas price or RPC URL
    /// are invalid, or if the key does not belong to the configured wallet.
    #[allow(clippy::result_large_err)]
    pub fn new(chain: &ChainConfig, credentials: &Credentials) -> Result<Self> {
        let signer = PrivateKeySigner::from_str(&credentials.private_key_hex)
            .map_err(|e| ConfigError::InvalidValue {
                field: PRIVATE_KEY_HEX,
                reason: e.to_string(),
            })?
            .with_chain_id(Some(chain.chain_id));

        let wallet = parse_address(WALLET_ADDRESS, &credentials.wallet_address)?;
        if wallet != signer.address() {
            return Err(ConfigError::InvalidValue {
                field: WALLET_ADDRESS,
                reason: format!("does not match signing key address {}", signer.address()),
            }
            .into());
        }

        let gas_price_wei = Wei::from_decimal(credentials.gas_price_gwei, GWEI_DECIMALS)
            .map_err(|e| ConfigError::InvalidValue {
                field: GAS_PRICE,
                reason: e.to_string(),
            })?
            .get();

        let rpc_url: url::Url = chain
            .rpc_endpoint(&credentials.rpc_project_id)
            .parse()
            .map_err(|e: url::ParseError| ConfigError::InvalidValue {
                field: "rpc_url",
                reason: e.to_string(),
            })?;

        Ok(Self {
            signer,
            rpc_url,
            exchange: parse_address("exchange_address", &chain.exchange_address)?,
            nft_contract: parse_address(CONTRACT_ADDRESS, &credentials.contract_address)?,
            gas_limit: chain.gas_limit,
            gas_price_wei,
            listing_time_backdate_secs: chain.listing_time_backdate_secs,
            nonce: Mutex::new(NonceCounter::new()),
        })
    }

    /// Address purchases are sent from.
    #[must_use]
    pub fn wallet_address(&self) -> Address {
        self.signer.address()
    }

    /// Gas price applied to every purchase, in wei.
    #[must_use]
    pub const fn gas_price_wei(&self) -> u128 {
        self.gas_price_wei
    }

    /// Nonce of the last confirmed broadcast, if any.
    #[must_use]
    pub fn last_nonce(&self) -> Option<u64> {
        self.nonce.lock().last_used()
    }

    fn buy_listing_time(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        now.saturating_sub(self.listing_time_backdate_secs)
    }

    async fn try_submit(&self, order: &Order) -> Result<String> {
        let params = BuyParams {
            buyer: self.signer.address(),
            nft_contract: self.nft_contract,
            listing_time: self.buy_listing_time(),
        };
        let call = build_atomic_match(order, &params)?;

        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(self.rpc_url.clone());

        let cached = self.nonce.lock().next_cached();
        let nonce = match cached {
            Some(nonce) => nonce,
            None => provider
                .get_transaction_count(self.signer.address())
                .await
                .map_err(|e| ExecutionError::NonceUnavailable(e.to_string()))?,
        };
        debug!(nonce, token_id = %order.token_id, "Signing purchase");

        let exchange = WyvernExchange::new(self.exchange, &provider);
        let pending = exchange
            .call_builder(&call)
            .value(U256::from(order.base_price.get()))
            .nonce(nonce)
            .gas(self.gas_limit)
            .gas_price(self.gas_price_wei)
            .send()
            .await
            .map_err(|e| ExecutionError::SubmissionFailed(e.to_string()))?;

        let tx_hash = format!("{:?}", pending.tx_hash());
        self.nonce.lock().commit(nonce);
        Ok(tx_hash)
    }
}

#[async_trait]
impl PurchaseSubmitter for EthereumSubmitter {
    async fn submit_purchase(&self, order: &Order) -> SubmitOutcome {
        match self.try_submit(order).await {
            Ok(tx_hash) => {
                info!(
                    tx_hash = %tx_hash,
                    token_id = %order.token_id,
                    price_wei = %order.base_price,
                    "Purchase transaction broadcast"
                );
                SubmitOutcome::Submitted { tx_hash }
            }
            Err(err) => {
                error!(error = %err, token_id = %order.token_id, "Purchase submission failed");
                SubmitOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn submitter_name(&self) -> &'static str {
        "Ethereum"
    }
}

#[allow(clippy::result_large_err)]
fn parse_address(field: &'static str, raw: &str) -> Result<Address> {
    Address::from_str(raw.trim()).map_err(|e| {
        ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    // Well-known development key (anvil account 0).
    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn credentials() -> Credentials {
        Credentials {
            api_key: "key".into(),
            contract_address: "0x00000000000000000000000000000000000000cc".into(),
            collection_id: "cool-cats".into(),
            private_key_hex: KEY.into(),
            wallet_address: KEY_ADDRESS.into(),
            rpc_project_id: "project".into(),
            gas_price_gwei: dec!(45.5),
            underpriced_ratio: dec!(0.8),
        }
    }

    #[test]
    fn new_converts_gas_price_to_wei() {
        let submitter = EthereumSubmitter::new(&ChainConfig::default(), &credentials()).unwrap();
        assert_eq!(submitter.gas_price_wei(), 45_500_000_000);
        assert_eq!(submitter.wallet_address(), KEY_ADDRESS.parse::<Address>().unwrap());
        assert_eq!(submitter.last_nonce(), None);
    }

    #[test]
    fn wallet_address_comparison_ignores_case() {
        let mut creds = credentials();
        creds.wallet_address = KEY_ADDRESS.to_lowercase();
        assert!(EthereumSubmitter::new(&ChainConfig::default(), &creds).is_ok());
    }

    #[test]
    fn mismatched_wallet_is_rejected() {
        let mut creds = credentials();
        creds.wallet_address = "0x00000000000000000000000000000000000000bb".into();
        match EthereumSubmitter::new(&ChainConfig::default(), &creds) {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => {
                assert_eq!(field, WALLET_ADDRESS);
            }
            other => panic!("expected wallet mismatch, got {:?}", other.err()),
        }
    }

    #[test]
    fn invalid_private_key_is_rejected() {
        let mut creds = credentials();
        creds.private_key_hex = "0xnothex".into();
        assert!(EthereumSubmitter::new(&ChainConfig::default(), &creds).is_err());
    }

    #[test]
    fn invalid_contract_address_is_rejected() {
        let mut creds = credentials();
        creds.contract_address = "cool-cats".into();
        assert!(EthereumSubmitter::new(&ChainConfig::default(), &creds).is_err());
    }

    #[test]
    fn buy_listing_time_is_backdated() {
        let submitter = EthereumSubmitter::new(&ChainConfig::default(), &credentials()).unwrap();
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let listing = submitter.buy_listing_time();
        assert!(listing <= now - 180);
        assert!(listing + 185 >= now);
    }
}
