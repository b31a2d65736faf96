// ⚠️ Errors - Input validation failures raised by the core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, InsightError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsightError {
    /// Malformed argument: negative or non-numeric age, non-positive
    /// top-N count, unknown scheme or dimension name.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl InsightError {
    pub fn invalid(message: impl Into<String>) -> Self {
        InsightError::InvalidInput(message.into())
    }
}
