//! # Donations Hex
//!
//! Application service layer and HTTP adapter for the donations relay.
//!
//! ## Architecture
//!
//! - `service/` - Application service (validate, delegate, report)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `G: PaymentGateway`, allowing different
//! processor adapters to be injected.

pub mod inbound;
pub mod service;


pub use service::DonationService;
