//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod marketplace;
pub mod submitter;
