//! Payment intents as seen from the relay.
//!
//! The processor owns the intent; the relay only builds creation parameters
//! and reads back the identifier and client secret.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Processor-assigned payment intent identifier (e.g. `pi_3Mtw...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentIntentId(String);

impl PaymentIntentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PaymentIntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameters for a new payment intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentIntent {
    /// Whole minor units in the deployment currency.
    pub amount: Money,
    /// Let the processor negotiate payment methods on-device.
    pub automatic_payment_methods: bool,
    pub metadata: BTreeMap<String, String>,
}

/// A payment intent returned by the processor after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: PaymentIntentId,
    /// One-time token the mobile client uses to confirm the payment.
    pub client_secret: String,
    /// Processor status; carried through but never inspected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
