//! # Donations Stripe
//!
//! Outbound adapter implementing the `PaymentGateway` port against Stripe's
//! REST API. Requests are form-encoded and bearer-authenticated with the
//! deployment's secret key; Stripe's error messages are surfaced unchanged.

mod gateway;
mod wire;

pub use gateway::{DEFAULT_API_BASE, StripeGateway};
