//! JNG CLI - storefront operations tooling.
//!
//! # Usage
//!
//! ```bash
//! # Run the storefront database migrations (postgres backend)
//! jng-cli migrate
//!
//! # Seed the demo catalog into the configured backend
//! jng-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run the storefront database migrations
//! - `seed` - Seed the demo catalog if the store is empty

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "jng-cli")]
#[command(author, version, about = "JNG storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Seed the demo catalog into the configured storage backend
    Seed,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
