//! Stripe wire format: form-encoded requests, JSON responses.

use serde::Deserialize;

use donations_types::{GatewayError, NewPaymentIntent, PaymentIntent, PaymentIntentId};

/// Flattens a new intent into Stripe's bracketed form fields.
pub(crate) fn form_fields(intent: &NewPaymentIntent) -> Vec<(String, String)> {
    let mut fields = vec![
        ("amount".to_string(), intent.amount.amount().to_string()),
        (
            "currency".to_string(),
            intent.amount.currency().code().to_string(),
        ),
        (
            "automatic_payment_methods[enabled]".to_string(),
            intent.automatic_payment_methods.to_string(),
        ),
    ];

    fields.extend(
        intent
            .metadata
            .iter()
            .map(|(key, value)| (format!("metadata[{key}]"), value.clone())),
    );

    fields
}

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    id: String,
    client_secret: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: Option<String>,
    code: Option<String>,
}

pub(crate) fn parse_payment_intent(body: &str) -> Result<PaymentIntent, GatewayError> {
    let raw: StripePaymentIntent = serde_json::from_str(body).map_err(|e| {
        GatewayError::MalformedResponse(format!("Invalid payment intent response: {e}"))
    })?;

    let client_secret = raw.client_secret.ok_or_else(|| {
        GatewayError::MalformedResponse("Payment intent response has no client_secret".into())
    })?;

    Ok(PaymentIntent {
        id: PaymentIntentId::new(raw.id),
        client_secret,
        status: raw.status,
    })
}

/// Maps a non-2xx Stripe response to a rejection carrying Stripe's own message.
pub(crate) fn parse_error(status: u16, body: &str) -> GatewayError {
    let fallback = || format!("Stripe returned HTTP {status}");

    match serde_json::from_str::<StripeErrorEnvelope>(body) {
        Ok(envelope) => GatewayError::Rejected {
            status,
            message: envelope.error.message.unwrap_or_else(fallback),
            code: envelope.error.code,
        },
        Err(_) if body.trim().is_empty() => GatewayError::rejected(status, fallback()),
        Err(_) => GatewayError::rejected(status, body.trim()),
    }
}
