//! Domain models for the donations relay.

pub mod donation;
pub mod money;
pub mod payment_intent;

pub use donation::{DEFAULT_APP_NAME, DEFAULT_MINIMUM_AMOUNT, DonationPolicy};
pub use money::{Currency, Money};
pub use payment_intent::{NewPaymentIntent, PaymentIntent, PaymentIntentId};
