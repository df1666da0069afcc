//! Signed sell orders.
//!
//! An [`Order`] carries everything needed to match it on-chain. Apart from
//! `token_id` and `base_price` the decision loop treats it as opaque; the
//! numeric and hex fields stay as the marketplace sent them and are parsed
//! only when the purchase transaction is encoded.

use super::id::TokenId;
use super::money::Wei;

/// Relayer and protocol fees of an order, as integer strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderFees {
    pub maker_relayer: String,
    pub taker_relayer: String,
    pub maker_protocol: String,
    pub taker_protocol: String,
}

/// ECDSA signature of the maker over the order hash.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderSignature {
    pub v: u8,
    /// 32-byte hex string.
    pub r: String,
    /// 32-byte hex string.
    pub s: String,
}

/// A marketplace-signed sell offer for one token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Order {
    pub token_id: TokenId,
    /// Asking price in the smallest currency unit.
    pub base_price: Wei,
    /// Exchange contract the order was signed for.
    pub exchange: String,
    pub maker: String,
    pub fee_recipient: String,
    pub fees: OrderFees,
    pub extra: String,
    pub listing_time: String,
    pub expiration_time: String,
    pub salt: String,
    pub fee_method: u8,
    pub sale_kind: u8,
    pub how_to_call: u8,
    pub calldata: String,
    pub replacement_pattern: String,
    pub static_extradata: String,
    pub signature: OrderSignature,
}

impl Order {
    /// True when this order asks exactly `price` (integer comparison).
    #[must_use]
    pub fn matches_price(&self, price: Wei) -> bool {
        self.base_price == price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_price_compares_raw_amounts() {
        let order = Order {
            token_id: TokenId::new("42"),
            base_price: Wei::new(500_000_000_000_000_000),
            ..Default::default()
        };

        assert!(order.matches_price(Wei::new(500_000_000_000_000_000)));
        assert!(!order.matches_price(Wei::new(500_000_000_000_000_001)));
    }
}
