//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::ethereum::{DryRunSubmitter, EthereumSubmitter};
use crate::adapter::outbound::opensea::OpenSeaClient;
use crate::application::sniper::{Sniper, SniperSettings};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{Marketplace, PurchaseSubmitter};

/// Build the marketplace client for the configured collection.
pub(crate) fn build_marketplace(config: &Config) -> Arc<dyn Marketplace> {
    let credentials = &config.credentials;
    Arc::new(OpenSeaClient::new(
        &config.marketplace,
        credentials.api_key.clone(),
        credentials.contract_address.clone(),
        credentials.collection_id.clone(),
    ))
}

/// Build the purchase submitter, honouring dry-run mode.
///
/// The signing key is validated even in dry-run mode so a bad key fails at
/// startup rather than on the first real purchase.
#[allow(clippy::result_large_err)]
pub(crate) fn build_submitter(config: &Config) -> Result<Arc<dyn PurchaseSubmitter>> {
    let submitter = EthereumSubmitter::new(&config.chain, &config.credentials)?;
    info!(
        wallet = %submitter.wallet_address(),
        gas_price_wei = submitter.gas_price_wei(),
        chain_id = config.chain.chain_id,
        "Purchase wallet ready"
    );

    if config.dry_run {
        warn!("Dry-run mode enabled, purchases will only be logged");
        return Ok(Arc::new(DryRunSubmitter::new()));
    }
    Ok(Arc::new(submitter))
}

/// Wire configured adapters into a ready-to-run [`Sniper`].
///
/// # Errors
///
/// Returns a configuration error if the submitter cannot be built.
#[allow(clippy::result_large_err)]
pub fn build_sniper(config: &Config) -> Result<Sniper> {
    let settings = SniperSettings::from_config(&config.sniper, config.credentials.underpriced_ratio)?;
    let marketplace = build_marketplace(config);
    let submitter = build_submitter(config)?;

    info!(
        collection = %config.credentials.collection_id,
        contract = %config.credentials.contract_address,
        ratio = %settings.underpriced_ratio,
        dry_run = config.dry_run,
        "Sniper configured"
    );
    Ok(Sniper::new(marketplace, submitter, settings))
}
