//! Mock Oracle for testing
//!
//! Provides configurable fixed prices and decimals for position valuation tests.

use async_trait::async_trait;
use homora_core::TokenAddress;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::error::OracleError;
use crate::types::{PriceOracle, TokenMetadata};

/// Mock Price Oracle and token metadata source
///
/// Stores fixed prices and decimals that can be updated programmatically.
/// Counts price lookups so tests can assert which tokens were queried.
pub struct MockOracle {
    /// Stored USD prices (token -> price)
    prices: RwLock<HashMap<TokenAddress, Decimal>>,
    /// Stored precisions (token -> decimals)
    decimals: RwLock<HashMap<TokenAddress, u32>>,
    price_lookups: AtomicUsize,
}

impl MockOracle {
    /// Create a new empty mock oracle
    pub fn new() -> Self {
        Self {
            prices: RwLock::new(HashMap::new()),
            decimals: RwLock::new(HashMap::new()),
            price_lookups: AtomicUsize::new(0),
        }
    }

    /// Set both price and decimals for a token
    pub fn set_token(&self, token: TokenAddress, usd_price: Decimal, decimals: u32) {
        self.set_price(token.clone(), usd_price);
        self.set_decimals(token, decimals);
    }

    /// Set a fixed USD price for a token
    pub fn set_price(&self, token: TokenAddress, usd_price: Decimal) {
        let mut prices = self.prices.write().unwrap_or_else(PoisonError::into_inner);
        prices.insert(token, usd_price);
    }

    /// Set the decimals reported for a token
    pub fn set_decimals(&self, token: TokenAddress, decimals: u32) {
        let mut map = self.decimals.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(token, decimals);
    }

    /// Remove price and decimals (for testing unknown token errors)
    pub fn remove_token(&self, token: &TokenAddress) {
        self.prices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
        self.decimals
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }

    /// Get number of priced tokens
    pub fn token_count(&self) -> usize {
        self.prices.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of `get_usd_price` calls served so far
    pub fn price_lookups(&self) -> usize {
        self.price_lookups.load(Ordering::Relaxed)
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceOracle for MockOracle {
    async fn get_usd_price(&self, token: &TokenAddress) -> Result<Decimal, OracleError> {
        self.price_lookups.fetch_add(1, Ordering::Relaxed);
        let prices = self.prices.read().unwrap_or_else(PoisonError::into_inner);
        prices
            .get(token)
            .copied()
            .ok_or_else(|| OracleError::unknown_token(token))
    }

    fn source_name(&self) -> &str {
        "mock"
    }
}

#[async_trait]
impl TokenMetadata for MockOracle {
    async fn decimals(&self, token: &TokenAddress) -> Result<u32, OracleError> {
        let map = self.decimals.read().unwrap_or_else(PoisonError::into_inner);
        map.get(token)
            .copied()
            .ok_or_else(|| OracleError::unknown_token(token))
    }
}
