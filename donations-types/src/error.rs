//! Error types for the donations relay.

use crate::domain::Money;
use crate::ports::GatewayError;

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid amount. Minimum donation is {minimum}")]
    InvalidAmount { minimum: Money },

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Minimum donation must be positive, got {0}")]
    NonPositiveMinimum(i64),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes: `Validation` is the caller's fault
/// (400), `Upstream` is the payment processor's (500).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] GatewayError),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::Validation(err.to_string())
    }
}
