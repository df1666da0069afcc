//! Domain validation errors.
//!
//! Returned when raw marketplace data cannot be turned into a domain value,
//! e.g. a price string that is not an integer.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An amount in the smallest currency unit could not be parsed.
    #[error("invalid amount '{value}': {reason}")]
    InvalidAmount {
        /// The raw value that was provided.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The amount does not fit into a decimal at the requested scale.
    #[error("amount {value} cannot be represented with {decimals} decimals")]
    AmountOutOfRange {
        /// The raw integer amount.
        value: String,
        /// Number of decimals used for the conversion.
        decimals: u32,
    },

    /// A required field was absent from an external record.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// An external record did not have the expected shape.
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}
