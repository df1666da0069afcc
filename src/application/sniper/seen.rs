//! De-duplication of listings across overlapping poll windows.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::domain::TokenId;

/// Last observed listing price per token.
///
/// Entries are never evicted; the cache lives as long as the process and
/// covers a single collection.
#[derive(Debug, Default, Clone)]
pub struct SeenPrices {
    prices: HashMap<TokenId, Decimal>,
}

impl SeenPrices {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `price` for `token` and report whether it is new information.
    ///
    /// Returns `false` only when the token was already cached at the same
    /// price; the cache is left unchanged in that case.
    pub fn observe(&mut self, token: &TokenId, price: Decimal) -> bool {
        match self.prices.get(token) {
            Some(last) if *last == price => false,
            _ => {
                self.prices.insert(token.clone(), price);
                true
            }
        }
    }

    #[must_use]
    pub fn last_price(&self, token: &TokenId) -> Option<Decimal> {
        self.prices.get(token).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
