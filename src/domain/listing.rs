//! Listing events reported by the marketplace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::error::DomainError;
use super::id::TokenId;
use super::money::Wei;

/// A token was newly put up for sale.
///
/// Immutable once received; consumed once by the decision loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEvent {
    token_id: TokenId,
    ending_price: Wei,
    occurred_at: DateTime<Utc>,
}

impl ListingEvent {
    pub fn new(token_id: impl Into<TokenId>, ending_price: Wei, occurred_at: DateTime<Utc>) -> Self {
        Self {
            token_id: token_id.into(),
            ending_price,
            occurred_at,
        }
    }

    #[must_use]
    pub fn token_id(&self) -> &TokenId {
        &self.token_id
    }

    /// Listing price in the smallest currency unit, exactly as reported.
    #[must_use]
    pub fn ending_price(&self) -> Wei {
        self.ending_price
    }

    #[must_use]
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Listing price in currency units.
    ///
    /// # Errors
    ///
    /// Fails when the raw price cannot be represented at `decimals` scale.
    pub fn price(&self, decimals: u32) -> Result<Decimal, DomainError> {
        self.ending_price.to_decimal(decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_converts_from_smallest_unit() {
        let event = ListingEvent::new("42", Wei::new(250_000_000_000_000_000), Utc::now());
        assert_eq!(event.price(18).unwrap(), dec!(0.25));
        assert_eq!(event.token_id().as_str(), "42");
    }
}
