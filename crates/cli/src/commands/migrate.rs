//! Database migration command.
//!
//! Applies the storefront migrations embedded in `jng-storefront` to the
//! database named by `STORE_DATABASE_URL` (falling back to `DATABASE_URL`).
//! The file backend needs no migrations; this command is for the postgres
//! backend only.

use secrecy::SecretString;

use jng_storefront::store::postgres;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the storefront database migrations.
///
/// # Errors
///
/// Returns an error if no database URL is configured, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STORE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("STORE_DATABASE_URL"))?;

    tracing::info!("Connecting to storefront database...");
    let pool = postgres::create_pool(&database_url).await?;

    tracing::info!("Running storefront migrations...");
    postgres::MIGRATOR.run(&pool).await?;

    tracing::info!("Storefront migrations complete");
    Ok(())
}
