//! Marketplace-agnostic domain types.
//!
//! Everything in here is plain data plus the small amount of logic that
//! belongs to the data itself (unit conversion, nonce bookkeeping). No I/O.

pub mod error;
pub mod id;
pub mod listing;
pub mod money;
pub mod nonce;
pub mod order;

pub use error::DomainError;
pub use id::TokenId;
pub use listing::ListingEvent;
pub use money::Wei;
pub use nonce::NonceCounter;
pub use order::{Order, OrderFees, OrderSignature};
