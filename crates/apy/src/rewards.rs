//! Pending farming rewards (MasterChef-style accumulators)
//!
//! A staking contract tracks `accRewardPerShare`, scaled by `10^precision`.
//! The reward owed to a position is its stake times the growth of that
//! accumulator since the position's entry snapshot.

use homora_core::RawAmount;
use rust_decimal::Decimal;

use crate::error::{CalcError, CalcResult};

/// Reward owed in the reward token's base units, truncated to whole units.
///
/// `precision` is the accumulator's scaling exponent (12 for classic
/// MasterChef pools, 18 for boosted ones).
pub fn pending_reward(
    collateral_size: RawAmount,
    entry_reward_per_share: Decimal,
    acc_reward_per_share: Decimal,
    precision: u32,
) -> CalcResult<RawAmount> {
    if acc_reward_per_share < entry_reward_per_share {
        return Err(CalcError::InvalidInput(format!(
            "reward per share went backwards: entry {} > current {}",
            entry_reward_per_share, acc_reward_per_share
        )));
    }

    // Scale the growth down first; stake * raw accumulator overflows Decimal
    let delta = acc_reward_per_share
        .checked_sub(entry_reward_per_share)
        .ok_or(CalcError::Overflow {
            context: "reward per share growth",
        })?;
    let growth = RawAmount::new(delta)?.normalize(precision)?;

    let reward = collateral_size
        .value()
        .checked_mul(growth)
        .ok_or(CalcError::Overflow {
            context: "pending reward",
        })?;

    Ok(RawAmount::new(reward.trunc())?)
}
