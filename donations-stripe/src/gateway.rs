//! HTTP gateway to the Stripe PaymentIntents API.

use std::fmt;

use async_trait::async_trait;
use tracing::instrument;

use donations_types::{GatewayError, NewPaymentIntent, PaymentGateway, PaymentIntent};

use crate::wire;

/// Production Stripe API root.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Stripe-backed [`PaymentGateway`].
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct StripeGateway {
    http: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeGateway {
    /// Creates a gateway that authenticates with the given secret key.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key: secret_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Points the gateway at another API root (a proxy or a local fake).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn payment_intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.api_base)
    }
}

impl fmt::Debug for StripeGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeGateway")
            .field("api_base", &self.api_base)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip_all, fields(amount = intent.amount.amount(), currency = %intent.amount.currency()))]
    async fn create_payment_intent(
        &self,
        intent: NewPaymentIntent,
    ) -> Result<PaymentIntent, GatewayError> {
        let resp = self
            .http
            .post(self.payment_intents_url())
            .bearer_auth(&self.secret_key)
            .form(&wire::form_fields(&intent))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = resp.status();
        tracing::debug!(stripe_status = %status, "payment_intents response");

        let body = resp
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if status.is_success() {
            wire::parse_payment_intent(&body)
        } else {
            Err(wire::parse_error(status.as_u16(), &body))
        }
    }
}
