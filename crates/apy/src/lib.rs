//! Homora APY - Lending position yield calculator
//!
//! Values a position's supplied collateral and borrowed tokens in USD through
//! a [`homora_oracle::PriceOracle`] and [`homora_oracle::TokenMetadata`] source,
//! then derives:
//! - the borrow APY (annualized borrow cost relative to supplied value)
//! - debt ratio, leverage and equity
//! - the leveraged aggregate APY of a farming position
//! - USD value of pending farming rewards
//! - LP stake value from pool reserves, and position values in the native token

pub mod aggregate;
pub mod breakdown;
pub mod calculator;
pub mod config;
pub mod error;
pub mod position;
pub mod report;
pub mod rewards;
pub mod valuation;

pub use aggregate::{aggregate_apy, AggregateApy, PoolApy};
pub use breakdown::BorrowApyBreakdown;
pub use calculator::ApyCalculator;
pub use config::CalculatorConfig;
pub use error::{CalcError, CalcResult};
pub use position::{BorrowEntry, LpStake, Position, SupplyEntry};
pub use report::PositionReport;
pub use rewards::pending_reward;
pub use valuation::{PoolReserves, PositionValue};
