//! OpenSea marketplace integration.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::OpenSeaClient;
pub use settings::OpenSeaConfig;
