//! Purchase submission port.

use async_trait::async_trait;

use crate::domain::Order;

/// Result of a purchase attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The transaction was broadcast.
    Submitted {
        /// Transaction hash for tracking.
        tx_hash: String,
    },
    /// Submission was deliberately not attempted (dry run).
    Skipped {
        /// Why nothing was sent.
        reason: String,
    },
    /// Nothing was broadcast, or the broadcast could not be confirmed.
    Failed {
        /// Human-readable error description.
        reason: String,
    },
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }

    /// Transaction hash, or an empty string when nothing was submitted.
    pub fn tx_hash(&self) -> &str {
        match self {
            Self::Submitted { tx_hash } => tx_hash,
            Self::Skipped { .. } | Self::Failed { .. } => "",
        }
    }
}

/// Port for buying a matched sell order.
///
/// Implementations own nonce management, encoding, signing and broadcast.
/// They never return an error: failures are logged and reported as
/// [`SubmitOutcome::Failed`].
#[async_trait]
pub trait PurchaseSubmitter: Send + Sync {
    /// Build, sign and broadcast a transaction that fills `order`.
    async fn submit_purchase(&self, order: &Order) -> SubmitOutcome;

    /// Return the submitter name for logging.
    fn submitter_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_outcome_has_empty_hash() {
        let outcome = SubmitOutcome::Failed {
            reason: "nonce too low".into(),
        };
        assert!(!outcome.is_submitted());
        assert_eq!(outcome.tx_hash(), "");
    }

    #[test]
    fn submitted_outcome_exposes_hash() {
        let outcome = SubmitOutcome::Submitted {
            tx_hash: "0xabc".into(),
        };
        assert!(outcome.is_submitted());
        assert_eq!(outcome.tx_hash(), "0xabc");
    }
}
