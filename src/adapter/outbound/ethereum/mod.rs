//! Ethereum purchase submission.

pub mod dry_run;
pub mod settings;
pub mod submitter;
pub mod wyvern;

pub use dry_run::DryRunSubmitter;
pub use settings::ChainConfig;
pub use submitter::EthereumSubmitter;
