#![allow(dead_code)]

pub mod recording_submitter;
pub mod scripted_marketplace;

use chrono::Utc;
use floorsniper::domain::{ListingEvent, Order, TokenId, Wei};

/// One whole currency unit (1 ETH) in wei.
pub const ETH: u128 = 1_000_000_000_000_000_000;

/// Listing for `token` at `wei`, occurring now.
pub fn listing(token: &str, wei: u128) -> ListingEvent {
    ListingEvent::new(token, Wei::new(wei), Utc::now())
}

/// Sell order for `token` at `wei` with the given maker.
pub fn order(token: &str, wei: u128, maker: &str) -> Order {
    Order {
        token_id: TokenId::new(token),
        base_price: Wei::new(wei),
        maker: maker.into(),
        ..Default::default()
    }
}
