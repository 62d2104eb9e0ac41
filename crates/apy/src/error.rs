//! Calculator errors

use homora_core::{AmountError, NormalizeError};
use homora_oracle::OracleError;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Unknown token: {token}")]
    UnknownToken { token: String },

    #[error("Length mismatch: {field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Division by zero: {context} is zero")]
    DivisionByZero { context: &'static str },

    #[error("Invalid price for {token}: {price}")]
    InvalidPrice { token: String, price: Decimal },

    #[error("Token {token} reports {decimals} decimals, max supported is {max}")]
    UnsupportedDecimals {
        token: String,
        decimals: u32,
        max: u32,
    },

    #[error("Arithmetic overflow computing {context}")]
    Overflow { context: &'static str },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Oracle error: {0}")]
    Oracle(#[source] OracleError),
}

pub type CalcResult<T> = Result<T, CalcError>;

impl From<OracleError> for CalcError {
    fn from(e: OracleError) -> Self {
        match e {
            OracleError::UnknownToken { token } => CalcError::UnknownToken { token },
            other => CalcError::Oracle(other),
        }
    }
}

impl From<AmountError> for CalcError {
    fn from(e: AmountError) -> Self {
        CalcError::InvalidInput(e.to_string())
    }
}

impl From<NormalizeError> for CalcError {
    fn from(e: NormalizeError) -> Self {
        // Token decimals are checked against the config before normalizing,
        // so an unsupported precision here came from caller input.
        match e {
            NormalizeError::UnsupportedDecimals(_) => CalcError::InvalidInput(e.to_string()),
            NormalizeError::Overflow { .. } => CalcError::Overflow {
                context: "token normalization",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_token_maps_through() {
        let err: CalcError = OracleError::unknown_token("0xabc").into();
        assert!(matches!(err, CalcError::UnknownToken { token } if token == "0xabc"));
    }

    #[test]
    fn test_other_oracle_errors_wrap() {
        let err: CalcError = OracleError::InvalidPrice {
            token: "0xabc".to_string(),
            reason: "stale".to_string(),
        }
        .into();
        assert!(matches!(err, CalcError::Oracle(OracleError::InvalidPrice { .. })));
    }

    #[test]
    fn test_error_messages() {
        let err = CalcError::LengthMismatch {
            field: "borrow_apys",
            expected: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "Length mismatch: borrow_apys has 1 entries, expected 2"
        );

        let err = CalcError::DivisionByZero {
            context: "supply value",
        };
        assert_eq!(err.to_string(), "Division by zero: supply value is zero");
    }
}
