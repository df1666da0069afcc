//! Monetary amounts.
//!
//! Marketplaces report prices as integer strings in the smallest currency
//! unit (wei for ETH). The decision loop compares prices as decimals, while
//! order matching compares the raw integers so no precision is lost.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::DomainError;

/// Integer amount in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Wei(u128);

impl Wei {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw integer amount.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Raw integer amount.
    #[must_use]
    pub const fn get(self) -> u128 {
        self.0
    }

    /// Convert to currency units by dividing by `10^decimals`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::AmountOutOfRange`] when the amount is too large
    /// for a 96-bit decimal mantissa or the scale exceeds 28.
    pub fn to_decimal(self, decimals: u32) -> Result<Decimal, DomainError> {
        let out_of_range = || DomainError::AmountOutOfRange {
            value: self.0.to_string(),
            decimals,
        };
        let mantissa = i128::try_from(self.0).map_err(|_| out_of_range())?;
        Decimal::try_from_i128_with_scale(mantissa, decimals)
            .map(|d| d.normalize())
            .map_err(|_| out_of_range())
    }

    /// Convert a decimal amount in currency units into the smallest unit,
    /// truncating any excess precision.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAmount`] for negative amounts and
    /// [`DomainError::AmountOutOfRange`] when the scaled value overflows.
    pub fn from_decimal(amount: Decimal, decimals: u32) -> Result<Self, DomainError> {
        if amount.is_sign_negative() {
            return Err(DomainError::InvalidAmount {
                value: amount.to_string(),
                reason: "must not be negative".into(),
            });
        }
        let out_of_range = || DomainError::AmountOutOfRange {
            value: amount.to_string(),
            decimals,
        };
        let factor = 10u64
            .checked_pow(decimals)
            .map(Decimal::from)
            .ok_or_else(out_of_range)?;
        let scaled = amount.checked_mul(factor).ok_or_else(out_of_range)?;
        scaled
            .trunc()
            .to_string()
            .parse::<u128>()
            .map(Self)
            .map_err(|_| out_of_range())
    }
}

impl FromStr for Wei {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u128>()
            .map(Self)
            .map_err(|e| DomainError::InvalidAmount {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Wei {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const ETH: u32 = 18;

    #[test]
    fn parses_integer_strings() {
        let wei: Wei = "500000000000000000".parse().unwrap();
        assert_eq!(wei.get(), 500_000_000_000_000_000);
    }

    #[test]
    fn rejects_non_integer_strings() {
        assert!("0.5".parse::<Wei>().is_err());
        assert!("".parse::<Wei>().is_err());
        assert!("-1".parse::<Wei>().is_err());
    }

    #[test]
    fn converts_to_eth() {
        let wei = Wei::new(500_000_000_000_000_000);
        assert_eq!(wei.to_decimal(ETH).unwrap(), dec!(0.5));
    }

    #[test]
    fn converts_whole_units() {
        let wei = Wei::new(3_000_000_000_000_000_000);
        assert_eq!(wei.to_decimal(ETH).unwrap(), dec!(3));
    }

    #[test]
    fn keeps_smallest_unit_precision() {
        assert_eq!(Wei::new(1).to_decimal(ETH).unwrap(), dec!(0.000000000000000001));
    }

    #[test]
    fn rejects_amounts_beyond_decimal_range() {
        let err = Wei::new(u128::MAX).to_decimal(ETH).unwrap_err();
        assert!(matches!(err, DomainError::AmountOutOfRange { .. }));
    }

    #[test]
    fn from_decimal_scales_gwei() {
        assert_eq!(Wei::from_decimal(dec!(45), 9).unwrap(), Wei::new(45_000_000_000));
        assert_eq!(Wei::from_decimal(dec!(1.5), 9).unwrap(), Wei::new(1_500_000_000));
    }

    #[test]
    fn from_decimal_truncates_excess_precision() {
        assert_eq!(Wei::from_decimal(dec!(0.0000000019), 9).unwrap(), Wei::new(1));
    }

    #[test]
    fn from_decimal_rejects_negative() {
        assert!(matches!(
            Wei::from_decimal(dec!(-1), 9),
            Err(DomainError::InvalidAmount { .. })
        ));
    }
}
