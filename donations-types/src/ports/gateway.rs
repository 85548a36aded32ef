//! Payment gateway port.
//!
//! This trait defines the interface to the external payment processor.
//! Implementations can be HTTP clients, mock gateways, etc.

use crate::domain::{NewPaymentIntent, PaymentIntent};

/// Failure raised by a payment gateway.
///
/// Whatever the variant, `Display` yields only the human-readable message,
/// which the relay hands back to its caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("{0}")]
    Transport(String),

    /// The processor answered with an error.
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// The processor answered successfully but the body was unusable.
    #[error("{0}")]
    MalformedResponse(String),
}

impl GatewayError {
    /// Shorthand for a rejection without a processor error code.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Rejected {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Port trait for payment processors.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// Creates a payment intent. Every call creates a new intent; there is
    /// no deduplication.
    async fn create_payment_intent(
        &self,
        intent: NewPaymentIntent,
    ) -> Result<PaymentIntent, GatewayError>;
}
