//! Donation policy: which amounts are accepted and how intents are tagged.

use std::collections::BTreeMap;

use super::money::{Currency, Money};
use super::payment_intent::NewPaymentIntent;
use crate::error::DomainError;

/// Smallest donation accepted by default, in minor units (£0.50).
pub const DEFAULT_MINIMUM_AMOUNT: i64 = 50;

/// Application tag attached to every payment intent by default.
pub const DEFAULT_APP_NAME: &str = "Compel";

/// Purpose tag attached to every payment intent.
pub const DONATION_TYPE: &str = "donation";

/// Deployment-wide rules for accepting a donation.
///
/// Built once at startup and shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationPolicy {
    minimum: Money,
    app_name: String,
}

impl Default for DonationPolicy {
    fn default() -> Self {
        Self {
            minimum: Money::from_non_negative(DEFAULT_MINIMUM_AMOUNT, Currency::GBP),
            app_name: DEFAULT_APP_NAME.to_string(),
        }
    }
}

impl DonationPolicy {
    pub fn new(
        currency: Currency,
        minimum_amount: i64,
        app_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if minimum_amount <= 0 {
            return Err(DomainError::NonPositiveMinimum(minimum_amount));
        }
        Ok(Self {
            minimum: Money::from_non_negative(minimum_amount, currency),
            app_name: app_name.into(),
        })
    }

    pub fn currency(&self) -> Currency {
        self.minimum.currency()
    }

    /// The minimum donation as money in the configured currency.
    pub fn minimum(&self) -> Money {
        self.minimum
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Validates a raw requested amount and rounds it to whole minor units.
    ///
    /// Missing, non-numeric, non-finite, zero, negative and sub-minimum
    /// amounts all yield the same [`DomainError::InvalidAmount`]. The
    /// comparison happens before rounding, so `49.6` is rejected.
    pub fn validate_amount(&self, raw: Option<f64>) -> Result<Money, DomainError> {
        let invalid = || DomainError::InvalidAmount {
            minimum: self.minimum,
        };

        let raw = raw.filter(|v| v.is_finite()).ok_or_else(invalid)?;
        if raw < self.minimum.amount() as f64 {
            return Err(invalid());
        }

        // `raw >= minimum > 0` here. `as` saturates, so anything past
        // i64::MAX is left for the processor to reject.
        Ok(Money::from_non_negative(
            raw.round() as i64,
            self.currency(),
        ))
    }

    /// Fixed metadata tags identifying the originating application and purpose.
    pub fn metadata(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("app".to_string(), self.app_name.clone()),
            ("type".to_string(), DONATION_TYPE.to_string()),
        ])
    }

    /// Builds the processor request for a validated donation amount.
    pub fn payment_intent_for(&self, amount: Money) -> NewPaymentIntent {
        NewPaymentIntent {
            amount,
            automatic_payment_methods: true,
            metadata: self.metadata(),
        }
    }
}
