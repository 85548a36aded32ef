//! Configuration loading from environment.

use std::env;
use std::fmt;

use anyhow::Context;
use donations_stripe::DEFAULT_API_BASE;
use donations_types::{
    Currency, DonationPolicy,
    domain::{DEFAULT_APP_NAME, DEFAULT_MINIMUM_AMOUNT},
};

/// Application configuration, read once at startup.
pub struct Config {
    pub port: u16,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub policy: DonationPolicy,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
            None => 3000,
        };

        let stripe_secret_key = lookup("STRIPE_SECRET_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("STRIPE_SECRET_KEY environment variable is required"))?;

        let stripe_api_base =
            lookup("STRIPE_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let currency: Currency = match lookup("DONATION_CURRENCY") {
            Some(raw) => raw.parse().context("DONATION_CURRENCY is not supported")?,
            None => Currency::GBP,
        };

        let minimum_amount = match lookup("MIN_DONATION_AMOUNT") {
            Some(raw) => raw.parse().with_context(|| {
                format!("MIN_DONATION_AMOUNT must be an integer, got {raw:?}")
            })?,
            None => DEFAULT_MINIMUM_AMOUNT,
        };

        let app_name = lookup("DONATION_APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        let policy = DonationPolicy::new(currency, minimum_amount, app_name)
            .context("invalid donation policy")?;

        Ok(Self {
            port,
            stripe_secret_key,
            stripe_api_base,
            policy,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("stripe_secret_key", &"<redacted>")
            .field("stripe_api_base", &self.stripe_api_base)
            .field("policy", &self.policy)
            .finish()
    }
}
