//! APY Calculator
//!
//! Prices every token in a position, then folds the quotes into supply
//! value, borrow value and borrow interest. Lookups may run concurrently,
//! but quotes are matched to entries by position and each total is summed in
//! value order, so the result depends neither on which lookup completes first
//! nor on the order of entries.

use futures::future::try_join_all;
use homora_core::{RawAmount, TokenAddress};
use homora_oracle::{PriceOracle, TokenMetadata, TokenQuote};
use rust_decimal::Decimal;

use crate::aggregate::{aggregate_apy, PoolApy};
use crate::breakdown::BorrowApyBreakdown;
use crate::config::CalculatorConfig;
use crate::error::{CalcError, CalcResult};
use crate::position::Position;
use crate::report::PositionReport;
use crate::valuation::{PoolReserves, PositionValue};

pub struct ApyCalculator<O> {
    oracle: O,
    config: CalculatorConfig,
}

impl<O> ApyCalculator<O>
where
    O: PriceOracle + TokenMetadata,
{
    /// Create a calculator with default configuration
    pub fn new(oracle: O) -> Self {
        Self::with_config(oracle, CalculatorConfig::default())
    }

    pub fn with_config(oracle: O, config: CalculatorConfig) -> Self {
        Self { oracle, config }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Borrow APY of a position, in percent (negative = cost)
    pub async fn compute_borrow_apy(&self, position: &Position) -> CalcResult<Decimal> {
        Ok(self.compute_breakdown(position).await?.borrow_apy)
    }

    /// Supply value, borrow value, borrow interest and borrow APY of a position
    pub async fn compute_breakdown(&self, position: &Position) -> CalcResult<BorrowApyBreakdown> {
        let lp_stake = position.active_lp_stake();

        let tokens: Vec<&TokenAddress> = position
            .supplies()
            .iter()
            .map(|s| &s.token)
            .chain(lp_stake.map(|lp| &lp.token))
            .chain(position.borrows().iter().map(|b| &b.token))
            .collect();

        let quotes = self.quote_all(&tokens).await?;
        let (supply_quotes, rest) = quotes.split_at(position.supplies().len());
        let (lp_quote, borrow_quotes) = rest.split_at(usize::from(lp_stake.is_some()));

        let mut supply_values = Vec::with_capacity(supply_quotes.len() + lp_quote.len());
        for (entry, quote) in position.supplies().iter().zip(supply_quotes) {
            let value = Self::usd_value(quote, entry.amount)?;
            tracing::debug!(token = %entry.token, amount = %entry.amount, value = %value, "Priced supply");
            supply_values.push(value);
        }

        if let (Some(lp), Some(quote)) = (lp_stake, lp_quote.first()) {
            let value = Self::usd_value(quote, lp.amount)?;
            tracing::debug!(token = %lp.token, amount = %lp.amount, value = %value, "Priced LP stake");
            supply_values.push(value);
        }

        let mut borrow_values = Vec::with_capacity(borrow_quotes.len());
        let mut borrow_interests = Vec::with_capacity(borrow_quotes.len());
        for (entry, quote) in position.borrows().iter().zip(borrow_quotes) {
            let value = Self::usd_value(quote, entry.amount)?;
            let interest = value.checked_mul(entry.borrow_apy).ok_or(CalcError::Overflow {
                context: "borrow interest",
            })?;
            tracing::debug!(
                token = %entry.token,
                amount = %entry.amount,
                value = %value,
                borrow_apy = %entry.borrow_apy,
                "Priced borrow"
            );
            borrow_values.push(value);
            borrow_interests.push(interest);
        }

        let supply_value = sum_sorted(supply_values, "supply value")?;
        let borrow_value = sum_sorted(borrow_values, "borrow value")?;
        let borrow_interest = sum_sorted(borrow_interests, "borrow interest")?;

        let breakdown = BorrowApyBreakdown::from_totals(supply_value, borrow_value, borrow_interest)?
            .round_apy(self.config.apy_scale);

        tracing::debug!(
            supply_value = %breakdown.supply_value,
            borrow_value = %breakdown.borrow_value,
            borrow_interest = %breakdown.borrow_interest,
            borrow_apy = %breakdown.borrow_apy,
            "Computed borrow APY"
        );

        Ok(breakdown)
    }

    /// USD value of a raw reward amount
    pub async fn reward_value(&self, token: &TokenAddress, amount: RawAmount) -> CalcResult<Decimal> {
        let quote = self.quote(token).await?;
        Self::usd_value(&quote, amount)
    }

    /// USD value of an LP stake priced through the pool's underlying reserves
    pub async fn lp_share_value(&self, pool: &PoolReserves, collateral_size: RawAmount) -> CalcResult<Decimal> {
        let owned = pool.underlying(collateral_size)?;
        let tokens: Vec<&TokenAddress> = owned.iter().map(|(token, _)| token).collect();
        let quotes = self.quote_all(&tokens).await?;

        let mut values = Vec::with_capacity(owned.len());
        for ((token, amount), quote) in owned.iter().zip(&quotes) {
            let value = Self::usd_value(quote, *amount)?;
            tracing::debug!(token = %token, amount = %amount, value = %value, "Priced LP underlying");
            values.push(value);
        }

        sum_sorted(values, "LP share value")
    }

    /// Position, debt and equity in USD and in `native_token`
    pub async fn position_value(&self, position: &Position, native_token: &TokenAddress) -> CalcResult<PositionValue> {
        let breakdown = self.compute_breakdown(position).await?;
        let native_price = self.quote(native_token).await?.usd_price;

        PositionValue::from_usd(breakdown.supply_value, breakdown.borrow_value, native_price)
    }

    /// Breakdown plus equity, debt ratio, leverage and (given pool yields) aggregate APY
    pub async fn report(&self, position: &Position, pool: Option<PoolApy>) -> CalcResult<PositionReport> {
        let breakdown = self.compute_breakdown(position).await?;
        let debt_ratio = breakdown.debt_ratio()?;

        let leverage_ratio = match breakdown.leverage_ratio() {
            Ok(leverage) => Some(leverage),
            Err(CalcError::DivisionByZero { .. }) => {
                tracing::warn!(
                    supply_value = %breakdown.supply_value,
                    borrow_value = %breakdown.borrow_value,
                    "Position has zero equity, leverage undefined"
                );
                None
            }
            Err(e) => return Err(e),
        };

        let aggregate = match (pool, leverage_ratio) {
            (Some(pool), Some(leverage)) => Some(aggregate_apy(pool, leverage, breakdown.borrow_apy)?),
            _ => None,
        };

        Ok(PositionReport {
            equity_value: breakdown.equity_value(),
            debt_ratio,
            leverage_ratio,
            aggregate,
            breakdown,
        })
    }

    async fn quote_all(&self, tokens: &[&TokenAddress]) -> CalcResult<Vec<TokenQuote>> {
        if self.config.concurrent_lookups {
            // try_join_all yields results in input order
            return try_join_all(tokens.iter().map(|token| self.quote(token))).await;
        }

        let mut quotes = Vec::with_capacity(tokens.len());
        for token in tokens {
            quotes.push(self.quote(token).await?);
        }
        Ok(quotes)
    }

    async fn quote(&self, token: &TokenAddress) -> CalcResult<TokenQuote> {
        let usd_price = self.oracle.get_usd_price(token).await.map_err(|e| {
            tracing::warn!(token = %token, source = self.oracle.source_name(), error = %e, "Price lookup failed");
            CalcError::from(e)
        })?;

        if usd_price < Decimal::ZERO {
            return Err(CalcError::InvalidPrice {
                token: token.to_string(),
                price: usd_price,
            });
        }

        let decimals = self.oracle.decimals(token).await.map_err(|e| {
            tracing::warn!(token = %token, error = %e, "Decimals lookup failed");
            CalcError::from(e)
        })?;

        if decimals > self.config.max_decimals {
            return Err(CalcError::UnsupportedDecimals {
                token: token.to_string(),
                decimals,
                max: self.config.max_decimals,
            });
        }

        Ok(TokenQuote::new(token.clone(), usd_price, decimals))
    }

    fn usd_value(quote: &TokenQuote, amount: RawAmount) -> CalcResult<Decimal> {
        quote.usd_value(amount)?.ok_or(CalcError::Overflow { context: "USD value" })
    }

}

/// Sum in ascending order of value, then scale.
///
/// `Decimal` rounds once a sum needs more than 28 significant digits, so the
/// summation order is fixed by the values themselves rather than by entry order.
pub(crate) fn sum_sorted(mut values: Vec<Decimal>, context: &'static str) -> CalcResult<Decimal> {
    values.sort_by(|a, b| a.cmp(b).then_with(|| a.scale().cmp(&b.scale())));
    values.into_iter().try_fold(Decimal::ZERO, |total, value| {
        total.checked_add(value).ok_or(CalcError::Overflow { context })
    })
}
