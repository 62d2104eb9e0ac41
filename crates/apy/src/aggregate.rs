//! Aggregate APY of a leveraged farming position
//!
//! Pool yields scale with leverage; the borrow APY is already relative to
//! supplied value, so it is added as-is.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// Unleveraged pool yields, in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolApy {
    pub farming: Decimal,
    pub trading_fee: Decimal,
}

impl PoolApy {
    pub fn new(farming: Decimal, trading_fee: Decimal) -> Self {
        Self {
            farming,
            trading_fee,
        }
    }

    pub fn total(&self) -> Decimal {
        self.farming + self.trading_fee
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateApy {
    pub farming: Decimal,
    pub trading_fee: Decimal,
    pub borrow: Decimal,
    pub total: Decimal,
}

/// Combine pool yields at `leverage` with the position's borrow APY
pub fn aggregate_apy(pool: PoolApy, leverage: Decimal, borrow_apy: Decimal) -> CalcResult<AggregateApy> {
    let overflow = || CalcError::Overflow {
        context: "aggregate APY",
    };

    let farming = pool.farming.checked_mul(leverage).ok_or_else(overflow)?;
    let trading_fee = pool.trading_fee.checked_mul(leverage).ok_or_else(overflow)?;
    let total = farming
        .checked_add(trading_fee)
        .and_then(|sum| sum.checked_add(borrow_apy))
        .ok_or_else(overflow)?;

    Ok(AggregateApy {
        farming,
        trading_fee,
        borrow: borrow_apy,
        total,
    })
}
