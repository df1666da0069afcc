//! Floor-price sniping: the trade decision loop and its state.

mod floor;
mod seen;
mod service;

pub use floor::FloorTracker;
pub use seen::SeenPrices;
pub use service::{is_underpriced, CycleReport, EventOutcome, Sniper, SniperSettings};
