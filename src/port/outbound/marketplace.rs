//! Marketplace read port.
//!
//! Listing events, open sell orders and collection floor statistics for the
//! watched collection. Implementations paginate transparently.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{ListingEvent, Order, TokenId};

/// Kind of marketplace event to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventKind {
    /// A new sell order was created (item listed).
    #[default]
    Created,
    /// A sale completed.
    Successful,
    /// A listing was cancelled.
    Cancelled,
}

impl EventKind {
    /// Wire name used by the marketplace API.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Successful => "successful",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "successful" => Ok(Self::Successful),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown event type '{other}'")),
        }
    }
}

/// Outcome of a marketplace read.
///
/// A failed read is not an error for the caller: it is logged by the adapter
/// and the caller falls back to a safe default.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// The request succeeded.
    Fetched(T),
    /// The request failed; nothing usable was returned.
    Failed {
        /// Human-readable error description.
        reason: String,
    },
}

impl<T> FetchOutcome<T> {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// Check if the read failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Return the fetched value, if any.
    pub fn fetched(self) -> Option<T> {
        match self {
            Self::Fetched(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }
}

impl<T: Default> FetchOutcome<T> {
    /// Return the fetched value or `T::default()` (empty list, zero price).
    pub fn unwrap_or_default(self) -> T {
        self.fetched().unwrap_or_default()
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for FetchOutcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Fetched(value),
            Err(err) => Self::failed(err.to_string()),
        }
    }
}

/// Port for reading marketplace data about the watched collection.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait Marketplace: Send + Sync {
    /// Fetch all events of `kind` that occurred after `after`.
    async fn fetch_events(
        &self,
        after: DateTime<Utc>,
        kind: EventKind,
    ) -> FetchOutcome<Vec<ListingEvent>>;

    /// Fetch open sell orders for the given tokens, in marketplace order.
    async fn fetch_orders(&self, token_ids: &[TokenId]) -> FetchOutcome<Vec<Order>>;

    /// Fetch the collection floor price in currency units.
    async fn fetch_floor_price(&self) -> FetchOutcome<Decimal>;

    /// Return the marketplace name for logging.
    fn marketplace_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn event_kind_round_trips_wire_name() {
        for kind in [EventKind::Created, EventKind::Successful, EventKind::Cancelled] {
            assert_eq!(kind.as_str().parse::<EventKind>().unwrap(), kind);
        }
        assert!("bid_entered".parse::<EventKind>().is_err());
    }

    #[test]
    fn failed_outcome_defaults_to_empty() {
        let outcome: FetchOutcome<Vec<ListingEvent>> = FetchOutcome::failed("timeout");
        assert!(outcome.is_failed());
        assert!(outcome.unwrap_or_default().is_empty());
    }

    #[test]
    fn failed_floor_defaults_to_zero() {
        let outcome: FetchOutcome<Decimal> = FetchOutcome::failed("503");
        assert_eq!(outcome.unwrap_or_default(), Decimal::ZERO);
    }

    #[test]
    fn converts_from_result() {
        let ok: FetchOutcome<Decimal> = Ok::<_, String>(dec!(1.5)).into();
        assert_eq!(ok, FetchOutcome::Fetched(dec!(1.5)));

        let err: FetchOutcome<Decimal> = Err::<Decimal, _>("boom").into();
        assert_eq!(
            err,
            FetchOutcome::Failed {
                reason: "boom".into()
            }
        );
    }
}
