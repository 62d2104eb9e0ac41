//! Oracle composition
//!
//! `FallbackOracle` tries a primary source and reverts to a secondary one on
//! any error, the way a "safe" on-chain oracle reverts to its aggregator.
//! `OracleSet` pairs an independent price feed with a metadata source.

use async_trait::async_trait;
use homora_core::TokenAddress;
use rust_decimal::Decimal;

use crate::error::OracleError;
use crate::types::{PriceOracle, TokenMetadata};

/// Primary source with a secondary fallback
pub struct FallbackOracle<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackOracle<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn secondary(&self) -> &S {
        &self.secondary
    }
}

#[async_trait]
impl<P, S> PriceOracle for FallbackOracle<P, S>
where
    P: PriceOracle,
    S: PriceOracle,
{
    async fn get_usd_price(&self, token: &TokenAddress) -> Result<Decimal, OracleError> {
        match self.primary.get_usd_price(token).await {
            Ok(price) => Ok(price),
            Err(e) => {
                tracing::warn!(
                    token = %token,
                    primary = self.primary.source_name(),
                    secondary = self.secondary.source_name(),
                    error = %e,
                    "Primary price source failed, reverting to fallback"
                );
                self.secondary.get_usd_price(token).await
            }
        }
    }

    fn source_name(&self) -> &str {
        self.primary.source_name()
    }
}

#[async_trait]
impl<P, S> TokenMetadata for FallbackOracle<P, S>
where
    P: TokenMetadata,
    S: TokenMetadata,
{
    async fn decimals(&self, token: &TokenAddress) -> Result<u32, OracleError> {
        match self.primary.decimals(token).await {
            Ok(decimals) => Ok(decimals),
            Err(e) => {
                tracing::warn!(token = %token, error = %e, "Primary metadata source failed, reverting to fallback");
                self.secondary.decimals(token).await
            }
        }
    }
}

/// A price feed and a metadata source used together
pub struct OracleSet<P, M> {
    prices: P,
    metadata: M,
}

impl<P, M> OracleSet<P, M> {
    pub fn new(prices: P, metadata: M) -> Self {
        Self { prices, metadata }
    }
}

#[async_trait]
impl<P, M> PriceOracle for OracleSet<P, M>
where
    P: PriceOracle,
    M: Send + Sync,
{
    async fn get_usd_price(&self, token: &TokenAddress) -> Result<Decimal, OracleError> {
        self.prices.get_usd_price(token).await
    }

    fn source_name(&self) -> &str {
        self.prices.source_name()
    }
}

#[async_trait]
impl<P, M> TokenMetadata for OracleSet<P, M>
where
    P: Send + Sync,
    M: TokenMetadata,
{
    async fn decimals(&self, token: &TokenAddress) -> Result<u32, OracleError> {
        self.metadata.decimals(token).await
    }
}
