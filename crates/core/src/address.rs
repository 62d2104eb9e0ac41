//! TokenAddress - Normalized EVM token addresses
//!
//! Addresses are stored lowercase, so a checksummed and a plain
//! address for the same contract compare and hash equal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing token addresses
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Empty token address")]
    Empty,

    #[error("Invalid token address format: {0}")]
    InvalidFormat(String),
}

/// A `0x`-prefixed, 20-byte token contract address.
///
/// The all-zero address is used by pool configurations to mean
/// "no token configured" (see [`TokenAddress::is_zero`]).
///
/// # Examples
/// ```
/// use homora_core::TokenAddress;
///
/// let wavax: TokenAddress = "0xB31f66AA3C1e785363F0875A1B74E27b85FD66c7".parse().unwrap();
/// assert_eq!(wavax.as_str(), "0xb31f66aa3c1e785363f0875a1b74e27b85fd66c7");
///
/// assert!(TokenAddress::zero().is_zero());
/// assert!("0x1234".parse::<TokenAddress>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenAddress(String);

impl TokenAddress {
    /// Number of hex digits after the `0x` prefix
    pub const HEX_LEN: usize = 40;

    /// The zero address (unconfigured token)
    pub fn zero() -> Self {
        Self(format!("0x{}", "0".repeat(Self::HEX_LEN)))
    }

    /// Returns the normalized address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the all-zero address
    pub fn is_zero(&self) -> bool {
        self.0[2..].bytes().all(|b| b == b'0')
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenAddress {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(TokenError::Empty);
        }

        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| TokenError::InvalidFormat(s.to_string()))?;

        if hex.len() != Self::HEX_LEN || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TokenError::InvalidFormat(s.to_string()));
        }

        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }
}

impl TryFrom<String> for TokenAddress {
    type Error = TokenError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TokenAddress> for String {
    fn from(address: TokenAddress) -> Self {
        address.0
    }
}
