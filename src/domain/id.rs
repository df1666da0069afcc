//! Domain identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Token identifier within the watched collection.
///
/// Kept as the decimal string the marketplace returns; token ids are
/// 256-bit integers and are only parsed when encoding a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId(String);

impl TokenId {
    /// Create a new `TokenId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the token ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TokenId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for TokenId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn token_id_displays_inner_value() {
        assert_eq!(TokenId::new("42").to_string(), "42");
    }

    #[test]
    fn token_id_works_as_map_key() {
        let mut map = HashMap::new();
        map.insert(TokenId::from("7"), 1);
        assert_eq!(map.get(&TokenId::new(String::from("7"))), Some(&1));
    }
}
