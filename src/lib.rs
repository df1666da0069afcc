//! Floorsniper - NFT floor-price sniping bot.
//!
//! Watches one collection on a marketplace for newly listed sell orders and
//! buys any listing priced below a configured fraction of the collection
//! floor.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Marketplace-agnostic types: token ids, amounts, listings, orders
//! - [`port`] - Traits for the marketplace reader and the purchase submitter
//! - [`adapter`] - OpenSea REST client and Ethereum (Wyvern) submitter
//! - [`application`] - The trade decision loop
//! - [`infrastructure`] - Configuration and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use floorsniper::infrastructure::bootstrap::build_sniper;
//! use floorsniper::infrastructure::config::settings::Config;
//!
//! # async fn run() -> floorsniper::error::Result<()> {
//! let config = Config::load_optional("config.toml")?;
//! let mut sniper = build_sniper(&config)?;
//! sniper.run().await;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
