//! Required process configuration read from the environment.
//!
//! These values identify the account, the watched collection and the
//! trading threshold. They are never read from the config file.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{ConfigError, Result};

pub const OPENSEA_API_KEY: &str = "OPENSEA_API_KEY";
pub const CONTRACT_ADDRESS: &str = "CONTRACT_ADDRESS";
pub const COLLECTION_ID: &str = "COLLECTION_ID";
pub const PRIVATE_KEY_HEX: &str = "PRIVATE_KEY_HEX";
pub const WALLET_ADDRESS: &str = "WALLET_ADDRESS";
pub const INFURA_PROJECT_ID: &str = "INFURA_PROJECT_ID";
pub const GAS_PRICE: &str = "GAS_PRICE";
pub const FLOOR_UNDERPRICED_RATIO: &str = "FLOOR_UNDERPRICED_RATIO";

/// Secrets and per-deployment settings.
#[derive(Clone, Default)]
pub struct Credentials {
    /// Marketplace API key.
    pub api_key: String,
    /// NFT contract of the watched collection.
    pub contract_address: String,
    /// Marketplace slug of the watched collection.
    pub collection_id: String,
    /// Hex-encoded signing key of the buying wallet.
    pub private_key_hex: String,
    /// Address of the buying wallet.
    pub wallet_address: String,
    /// Project id appended to the RPC URL.
    pub rpc_project_id: String,
    /// Gas price in gwei.
    pub gas_price_gwei: Decimal,
    /// Fraction of the floor below which a listing is bought (e.g. 0.8).
    pub underpriced_ratio: Decimal,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("contract_address", &self.contract_address)
            .field("collection_id", &self.collection_id)
            .field("private_key_hex", &"<redacted>")
            .field("wallet_address", &self.wallet_address)
            .field("rpc_project_id", &"<redacted>")
            .field("gas_price_gwei", &self.gas_price_gwei)
            .field("underpriced_ratio", &self.underpriced_ratio)
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] for the first unset variable and
    /// [`ConfigError::InvalidValue`] for unparsable numbers.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary key lookup.
    #[allow(clippy::result_large_err)]
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |field: &'static str| -> Result<String> {
            match lookup(field) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                _ => Err(ConfigError::MissingField { field }.into()),
            }
        };

        let api_key = require(OPENSEA_API_KEY)?;
        let contract_address = require(CONTRACT_ADDRESS)?;
        let collection_id = require(COLLECTION_ID)?;
        let private_key_hex = require(PRIVATE_KEY_HEX)?;
        let wallet_address = require(WALLET_ADDRESS)?;
        let rpc_project_id = require(INFURA_PROJECT_ID)?;
        let gas_price_gwei = parse_positive(GAS_PRICE, &require(GAS_PRICE)?)?;
        let underpriced_ratio =
            parse_positive(FLOOR_UNDERPRICED_RATIO, &require(FLOOR_UNDERPRICED_RATIO)?)?;

        Ok(Self {
            api_key,
            contract_address,
            collection_id,
            private_key_hex,
            wallet_address,
            rpc_project_id,
            gas_price_gwei,
            underpriced_ratio,
        })
    }
}

#[allow(clippy::result_large_err)]
fn parse_positive(field: &'static str, raw: &str) -> Result<Decimal> {
    let value = Decimal::from_str(raw).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    if value <= Decimal::ZERO {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than 0".to_string(),
        }
        .into());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, String> {
        HashMap::from([
            (OPENSEA_API_KEY, "key".to_string()),
            (CONTRACT_ADDRESS, "0x00000000000000000000000000000000000000aa".to_string()),
            (COLLECTION_ID, "cool-cats".to_string()),
            (PRIVATE_KEY_HEX, "ab".repeat(32)),
            (WALLET_ADDRESS, "0x00000000000000000000000000000000000000bb".to_string()),
            (INFURA_PROJECT_ID, "project".to_string()),
            (GAS_PRICE, "45".to_string()),
            (FLOOR_UNDERPRICED_RATIO, "0.8".to_string()),
        ])
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<Credentials> {
        Credentials::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn loads_all_fields() {
        let creds = load(&full_env()).unwrap();
        assert_eq!(creds.collection_id, "cool-cats");
        assert_eq!(creds.gas_price_gwei, dec!(45));
        assert_eq!(creds.underpriced_ratio, dec!(0.8));
    }

    #[test]
    fn every_variable_is_required() {
        for key in full_env().keys() {
            let mut env = full_env();
            env.remove(key);
            match load(&env) {
                Err(Error::Config(ConfigError::MissingField { field })) => assert_eq!(field, *key),
                other => panic!("expected missing {key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let mut env = full_env();
        env.insert(COLLECTION_ID, "   ".into());
        assert!(matches!(
            load(&env),
            Err(Error::Config(ConfigError::MissingField {
                field: COLLECTION_ID
            }))
        ));
    }

    #[test]
    fn rejects_unparsable_ratio() {
        let mut env = full_env();
        env.insert(FLOOR_UNDERPRICED_RATIO, "eighty percent".into());
        assert!(matches!(
            load(&env),
            Err(Error::Config(ConfigError::InvalidValue {
                field: FLOOR_UNDERPRICED_RATIO,
                ..
            }))
        ));
    }

    #[test]
    fn rejects_non_positive_gas_price() {
        let mut env = full_env();
        env.insert(GAS_PRICE, "0".into());
        assert!(matches!(
            load(&env),
            Err(Error::Config(ConfigError::InvalidValue { field: GAS_PRICE, .. }))
        ));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let creds = load(&full_env()).unwrap();
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains(&"ab".repeat(32)));
        assert!(rendered.contains("<redacted>"));
    }
}
