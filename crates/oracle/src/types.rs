//! Core oracle types

use async_trait::async_trait;
use homora_core::{NormalizeError, RawAmount, TokenAddress};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::OracleError;

/// Everything needed to value an amount of one token in USD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenQuote {
    pub token: TokenAddress,
    /// USD price of one whole token
    pub usd_price: Decimal,
    /// Decimal precision of the token's base unit
    pub decimals: u32,
}

impl TokenQuote {
    pub fn new(token: TokenAddress, usd_price: Decimal, decimals: u32) -> Self {
        Self {
            token,
            usd_price,
            decimals,
        }
    }

    /// USD value of a raw amount: `amount / 10^decimals * price`
    ///
    /// `Ok(None)` means the product overflowed `Decimal`.
    pub fn usd_value(&self, amount: RawAmount) -> Result<Option<Decimal>, NormalizeError> {
        let units = amount.normalize(self.decimals)?;
        Ok(units.checked_mul(self.usd_price))
    }
}

/// Price Oracle trait - USD price feed per token
///
/// Implementations can be:
/// - MockOracle: For testing with fixed prices
/// - An on-chain aggregator reading a pool's price contract
/// - A market data API keyed by token address
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Get the current USD price of one whole token
    async fn get_usd_price(&self, token: &TokenAddress) -> Result<Decimal, OracleError>;

    /// Short name used in log fields
    fn source_name(&self) -> &str {
        "unknown"
    }
}

/// Token metadata source - ERC20 `decimals()` lookups
#[async_trait]
pub trait TokenMetadata: Send + Sync {
    /// Get the decimal precision of the token's base unit
    async fn decimals(&self, token: &TokenAddress) -> Result<u32, OracleError>;
}

#[async_trait]
impl<T: PriceOracle + ?Sized> PriceOracle for Arc<T> {
    async fn get_usd_price(&self, token: &TokenAddress) -> Result<Decimal, OracleError> {
        (**self).get_usd_price(token).await
    }

    fn source_name(&self) -> &str {
        (**self).source_name()
    }
}

#[async_trait]
impl<T: TokenMetadata + ?Sized> TokenMetadata for Arc<T> {
    async fn decimals(&self, token: &TokenAddress) -> Result<u32, OracleError> {
        (**self).decimals(token).await
    }
}
