//! Donations CLI
//!
//! Command-line interface for the donations relay.

use anyhow::Result;
use clap::{Parser, Subcommand};

use donations_client::DonationsClient;

#[derive(Parser)]
#[command(name = "donations")]
#[command(author, version, about = "Donations relay CLI client", long_about = None)]
struct Cli {
    /// Base URL of the donations relay
    #[arg(
        long,
        env = "DONATIONS_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server health
    Health,
    /// Create a payment intent for a donation
    Donate {
        /// Amount in minor currency units (e.g. 500 = £5.00)
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = DonationsClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let health = client.health().await?;
            println!("✓ {} ({})", health.status, health.timestamp);
        }

        Commands::Donate { amount } => {
            let created = client.create_payment_intent(amount).await?;
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
    }

    Ok(())
}
