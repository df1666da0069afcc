//! Configuration loading and validation.

pub mod credentials;
pub mod logging;
pub mod settings;
pub mod sniper;
