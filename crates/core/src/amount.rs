//! RawAmount - Non-negative token amount in smallest units
//!
//! Token balances come from contracts as integers in the token's base unit
//! (wei for an 18-decimal token). Converting to whole tokens divides by
//! `10^decimals`, which is done here in `rust_decimal` arithmetic.
//!
//! # Range
//! `Decimal` holds a 96-bit mantissa with at most 28 significant digits, so a
//! raw amount can be at most [`RawAmount::MAX`] (about 7.9e28 base units, or
//! roughly 79 billion whole tokens at 18 decimals). Larger values are rejected
//! with [`AmountError::OutOfRange`] when parsed or deserialized.

use rust_decimal::{Decimal, MathematicalOps};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest decimal precision `Decimal` can divide by (10^28 is its largest power of ten)
pub const MAX_DECIMALS: u32 = 28;

/// Errors that can occur when constructing amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    #[error("Amount {0} is out of range (max 79228162514264337593543950335)")]
    OutOfRange(String),

    #[error("Invalid amount format: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur when normalizing an amount by its token decimals
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Unsupported token decimals: {0} (max 28)")]
    UnsupportedDecimals(u32),

    #[error("Arithmetic overflow normalizing {amount} by 10^{decimals}")]
    Overflow { amount: Decimal, decimals: u32 },
}

/// A non-negative amount of a token, denominated in its smallest unit.
///
/// # Invariant
/// The inner value is always >= 0. This is enforced by the constructor.
///
/// # Example
/// ```
/// use homora_core::RawAmount;
/// use rust_decimal::Decimal;
///
/// // 1000 USDC (6 decimals)
/// let amount = RawAmount::from_units(1_000_000_000);
/// assert_eq!(amount.normalize(6).unwrap(), Decimal::from(1000));
///
/// assert!(RawAmount::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "Decimal")]
pub struct RawAmount(Decimal);

impl RawAmount {
    /// Zero amount constant
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest representable amount (`2^96 - 1` base units)
    pub const MAX: Self = Self(Decimal::MAX);

    /// Create a new amount from a Decimal.
    ///
    /// Returns an error if the value is negative.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value < Decimal::ZERO {
            Err(AmountError::NegativeAmount(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Create an amount from an integer count of base units
    pub fn from_units(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    /// Get the inner Decimal value
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Convert to whole tokens: `amount / 10^decimals`
    pub fn normalize(&self, decimals: u32) -> Result<Decimal, NormalizeError> {
        if decimals > MAX_DECIMALS {
            return Err(NormalizeError::UnsupportedDecimals(decimals));
        }

        let overflow = || NormalizeError::Overflow {
            amount: self.0,
            decimals,
        };

        let divisor = Decimal::TEN.checked_powu(u64::from(decimals)).ok_or_else(overflow)?;
        self.0.checked_div(divisor).ok_or_else(overflow)
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for RawAmount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RawAmount> for Decimal {
    fn from(amount: RawAmount) -> Self {
        amount.0
    }
}

impl Default for RawAmount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for RawAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match Decimal::from_str(s) {
            Ok(value) => Self::new(value),
            // Well-formed digits that Decimal cannot hold
            Err(_) if is_plain_number(s) => Err(AmountError::OutOfRange(s.to_string())),
            Err(_) => Err(AmountError::InvalidFormat(s.to_string())),
        }
    }
}

fn is_plain_number(s: &str) -> bool {
    let unsigned = s
        .strip_prefix('-')
        .or_else(|| s.strip_prefix('+'))
        .unwrap_or(s);
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !int.is_empty()
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}

impl<'de> Deserialize<'de> for RawAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawAmountVisitor)
    }
}

struct RawAmountVisitor;

impl<'de> Visitor<'de> for RawAmountVisitor {
    type Value = RawAmount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative amount as a decimal string or integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawAmount, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawAmount, E> {
        Ok(RawAmount::from_units(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawAmount, E> {
        RawAmount::new(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawAmount, E> {
        let value =
            Decimal::try_from(v).map_err(|_| E::custom(AmountError::OutOfRange(v.to_string())))?;
        RawAmount::new(value).map_err(E::custom)
    }
}
