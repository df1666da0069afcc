//! Submitter that logs purchases instead of sending them.

use async_trait::async_trait;
use tracing::info;

use crate::domain::Order;
use crate::port::{PurchaseSubmitter, SubmitOutcome};

/// Reports every purchase as [`SubmitOutcome::Skipped`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunSubmitter;

impl DryRunSubmitter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PurchaseSubmitter for DryRunSubmitter {
    async fn submit_purchase(&self, order: &Order) -> SubmitOutcome {
        info!(
            token_id = %order.token_id,
            price_wei = %order.base_price,
            maker = %order.maker,
            "[DRY RUN] Would buy listing"
        );
        SubmitOutcome::Skipped {
            reason: "dry run".into(),
        }
    }

    fn submitter_name(&self) -> &'static str {
        "DryRun"
    }
}
