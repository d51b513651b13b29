//! Soap Store CLI - Database migrations and Shopify checks.
//!
//! # Usage
//!
//! ```bash
//! # Create the session table
//! soap-store-cli migrate
//!
//! # Verify Storefront API credentials and the header menu
//! soap-store-cli check
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run the session store migration
//! - `check` - Query the Storefront API with the configured token

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "soap-store-cli")]
#[command(author, version, about = "Soap Store CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the session table used by the storefront
    Migrate,
    /// Check Shopify Storefront API connectivity
    Check,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::sessions().await?,
        Commands::Check => commands::check::shopify().await?,
    }
    Ok(())
}
