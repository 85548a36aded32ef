//! # Donations Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the Stripe gateway
//! - Create the donation service
//! - Start the HTTP server

mod config;
mod telemetry;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use donations_hex::{DonationService, inbound::HttpServer};
use donations_stripe::StripeGateway;

use telemetry::Telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize OpenTelemetry tracing and metrics (optional)
    let otel = Telemetry::from_env()?;
    let telemetry = otel
        .as_ref()
        .map(|otel| tracing_opentelemetry::layer().with_tracer(otel.tracer.clone()));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,donations_app=debug,donations_hex=debug,donations_stripe=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting donations relay on port {}", config.port);
    tracing::debug!(?config, "Loaded configuration");

    // Build the Stripe gateway
    let gateway =
        StripeGateway::new(config.stripe_secret_key).with_api_base(config.stripe_api_base);

    // Create the donation service
    let service = DonationService::new(gateway, config.policy);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    tracing::info!("📍 Local: http://localhost:{}", config.port);
    server.run(&addr).await?;

    // Ensure traces and metrics are flushed before exit
    if let Some(otel) = otel {
        otel.shutdown();
    }
    Ok(())
}
