//! Donation Application Service
//!
//! Validates a donation, delegates creation to the payment gateway port and
//! reports the outcome. Contains NO infrastructure logic.

use donations_types::{
    AppError, CreatePaymentIntentRequest, Currency, DonationPolicy, PaymentGateway,
    PaymentIntent,
};

/// Application service for donation payments.
///
/// Generic over `G: PaymentGateway` - the processor adapter is injected at
/// compile time, so tests swap in a mock without touching the service.
pub struct DonationService<G: PaymentGateway> {
    gateway: G,
    policy: DonationPolicy,
}

impl<G: PaymentGateway> DonationService<G> {
    /// Creates a new donation service with the given gateway and policy.
    pub fn new(gateway: G, policy: DonationPolicy) -> Self {
        Self { gateway, policy }
    }

    /// Returns a reference to the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn policy(&self) -> &DonationPolicy {
        &self.policy
    }

    /// Creates a payment intent for a donation.
    ///
    /// Invalid amounts fail with [`AppError::Validation`] before the gateway
    /// is contacted. Any gateway failure becomes [`AppError::Upstream`].
    pub async fn create_payment_intent(
        &self,
        req: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, AppError> {
        let amount = self.policy.validate_amount(req.amount).map_err(|e| {
            tracing::debug!(requested = ?req.amount, "Rejected donation: {}", e);
            AppError::from(e)
        })?;

        let requested = req.amount.unwrap_or(amount.amount() as f64);
        let intent = self.policy.payment_intent_for(amount);

        match self.gateway.create_payment_intent(intent).await {
            Ok(created) => {
                tracing::info!(
                    payment_intent_id = %created.id,
                    requested,
                    amount = amount.amount(),
                    "✅ Payment Intent created: {} for {} (charged {})",
                    created.id,
                    requested_display(requested, amount.currency()),
                    amount
                );
                Ok(created)
            }
            Err(e) => {
                tracing::error!("❌ Error creating payment intent: {}", e);
                Err(e.into())
            }
        }
    }
}

/// Renders the amount the caller asked for in major units, unrounded
/// (`62.5` in GBP is `£0.625`).
pub(crate) fn requested_display(requested: f64, currency: Currency) -> String {
    format!("{}{}", currency.symbol(), requested / 100.0)
}
