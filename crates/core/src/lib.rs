//! Homora Core - Domain types
//!
//! This crate contains the fundamental types shared by the oracle and APY crates:
//! - `TokenAddress`: Normalized EVM token address
//! - `RawAmount`: Non-negative token amount in the token's smallest unit

pub mod address;
pub mod amount;

pub use address::{TokenAddress, TokenError};
pub use amount::{AmountError, NormalizeError, RawAmount, MAX_DECIMALS};
