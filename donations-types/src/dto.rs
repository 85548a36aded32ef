//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Field names follow the mobile client's camelCase contract.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::PaymentIntent;

/// Status string reported by the health endpoint.
pub const SERVER_STATUS: &str = "Compel Payment Server Running";

// ─────────────────────────────────────────────────────────────────────────────
// Payment Intent DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a payment intent for a donation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Donation in minor currency units. A JSON number or a string holding a
    /// finite number is accepted; anything else deserializes to `None`.
    #[serde(
        default,
        deserialize_with = "number_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,
}

impl CreatePaymentIntentRequest {
    pub fn new(amount: f64) -> Self {
        Self {
            amount: Some(amount),
        }
    }
}

fn number_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite()),
        other => other.as_f64(),
    })
}

/// Response after a payment intent was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
}

impl From<PaymentIntent> for PaymentIntentResponse {
    fn from(intent: PaymentIntent) -> Self {
        Self {
            client_secret: intent.client_secret,
            payment_intent_id: intent.id.into_inner(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Health & Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Health check body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 UTC with millisecond precision, e.g. `2026-01-01T00:00:00.000Z`.
    #[serde(serialize_with = "rfc3339_millis")]
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn running_at(timestamp: DateTime<Utc>) -> Self {
        Self {
            status: SERVER_STATUS.to_string(),
            timestamp,
        }
    }
}

fn rfc3339_millis<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
