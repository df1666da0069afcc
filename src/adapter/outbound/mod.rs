//! Outbound adapters (driven side).

pub mod ethereum;
pub mod opensea;
