use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Execution-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("invalid order field {field}: {reason}")]
    InvalidOrder { field: &'static str, reason: String },

    #[error("failed to look up nonce: {0}")]
    NonceUnavailable(String),

    #[error("failed to submit transaction: {0}")]
    SubmissionFailed(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("unexpected response: {0}")]
    Response(String),
}

pub type Result<T> = std::result::Result<T, Error>;
