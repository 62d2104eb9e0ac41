//! LP share valuation and native-token denominated position values
//!
//! An LP token is a claim on a share of its pool's reserves. Holding
//! `collateral_size` of `total_supply` LP tokens owns
//! `reserve * collateral_size / total_supply` of each underlying token.

use homora_core::{RawAmount, TokenAddress};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// Reserves of a liquidity pool alongside the LP token's total supply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolReserves {
    pub reserves: Vec<(TokenAddress, RawAmount)>,
    pub total_supply: RawAmount,
}

impl PoolReserves {
    pub fn new(total_supply: RawAmount) -> Self {
        Self {
            reserves: Vec::new(),
            total_supply,
        }
    }

    pub fn with_reserve(mut self, token: TokenAddress, amount: RawAmount) -> Self {
        self.reserves.push((token, amount));
        self
    }

    /// Underlying amounts owned by `collateral_size` LP tokens, truncated to base units
    pub fn underlying(&self, collateral_size: RawAmount) -> CalcResult<Vec<(TokenAddress, RawAmount)>> {
        if self.total_supply.is_zero() {
            return Err(CalcError::DivisionByZero {
                context: "LP total supply",
            });
        }

        let supply = self.total_supply.value();
        let collateral = collateral_size.value();

        self.reserves
            .iter()
            .map(|(token, reserve)| {
                let reserve = reserve.value();
                // Multiply first when it fits; otherwise scale by the share
                let owned = reserve
                    .checked_mul(collateral)
                    .and_then(|product| product.checked_div(supply))
                    .or_else(|| {
                        collateral
                            .checked_div(supply)
                            .and_then(|share| reserve.checked_mul(share))
                    })
                    .ok_or(CalcError::Overflow {
                        context: "LP underlying amount",
                    })?;

                Ok((token.clone(), RawAmount::new(owned.trunc())?))
            })
            .collect()
    }
}

/// Position, debt and equity in USD and in the chain's native token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionValue {
    pub position_usd: Decimal,
    pub debt_usd: Decimal,
    pub equity_usd: Decimal,
    pub position_native: Decimal,
    pub debt_native: Decimal,
    pub equity_native: Decimal,
}

impl PositionValue {
    /// Denominate USD totals in a native token priced at `native_price` USD
    pub fn from_usd(position_usd: Decimal, debt_usd: Decimal, native_price: Decimal) -> CalcResult<Self> {
        if native_price.is_zero() {
            return Err(CalcError::DivisionByZero {
                context: "native token price",
            });
        }

        let to_native = |usd: Decimal| {
            usd.checked_div(native_price).ok_or(CalcError::Overflow {
                context: "native value",
            })
        };

        let equity_usd = position_usd - debt_usd;
        let position_native = to_native(position_usd)?;
        let debt_native = to_native(debt_usd)?;

        Ok(Self {
            position_usd,
            debt_usd,
            equity_usd,
            position_native,
            debt_native,
            equity_native: position_native - debt_native,
        })
    }
}
