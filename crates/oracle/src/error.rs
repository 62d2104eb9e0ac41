//! Oracle error types

use thiserror::Error;

/// Oracle-related errors
#[derive(Debug, Error)]
pub enum OracleError {
    /// No price or metadata known for this token
    #[error("Unknown token: {token}")]
    UnknownToken { token: String },

    /// Price data is invalid
    #[error("Invalid price for {token}: {reason}")]
    InvalidPrice { token: String, reason: String },

    /// External oracle connection failed
    #[error("Oracle connection failed: {source}")]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl OracleError {
    pub fn unknown_token(token: impl ToString) -> Self {
        Self::UnknownToken {
            token: token.to_string(),
        }
    }
}
