//! Demo catalog seeding command.
//!
//! Builds whichever storage backend the environment selects and seeds the
//! fixed demo catalog into it, but only when the catalog is empty. Safe to
//! run repeatedly.

use jng_storefront::config::{ConfigError, StoreConfig};
use jng_storefront::store::{self, StoreError};

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Seed the demo catalog into the configured backend.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the backend cannot be
/// opened or written.
pub async fn run() -> Result<(), SeedError> {
    let config = StoreConfig::from_env()?;
    let store = store::connect(&config).await?;

    if store.seed_demo_products().await? {
        tracing::info!("Demo catalog seeded");
    } else {
        tracing::info!("Catalog already has products, nothing to do");
    }

    Ok(())
}
