//! Homora Price Oracle
//!
//! Read-only collaborators used to value a lending position:
//! USD prices per token and token decimal precision.
//! `MockOracle` serves fixed data; `FallbackOracle` and `OracleSet`
//! compose real sources.

mod error;
mod fallback;
mod mock;
mod types;

pub use error::OracleError;
pub use fallback::{FallbackOracle, OracleSet};
pub use mock::MockOracle;
pub use types::{PriceOracle, TokenMetadata, TokenQuote};
