//! Storage backends for the catalog and order persistence.
//!
//! One logical contract, two implementations selected at startup:
//!
//! - [`FileStore`] - a single JSON document on disk, for zero-dependency demo
//!   deployments.
//! - [`PgStore`] - `PostgreSQL` via sqlx, for anything beyond a demo.
//!
//! Route handlers only ever see [`DynStore`], so they are backend-agnostic.
//! The session cart is NOT stored here; it lives in the session layer. The
//! store persists the catalog and the purchases made from carts.

use std::sync::Arc;

use async_trait::async_trait;
use jng_core::{Cart, ContactInfo, PurchaseId};
use rust_decimal::Decimal;
use thiserror::Error;

pub mod file;
pub mod postgres;

pub use file::FileStore;
pub use postgres::PgStore;

use crate::config::{StoreBackend, StoreConfig};
use crate::models::{Product, Purchase, PurchaseItem};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error from the document store.
    #[error("document store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The on-disk document could not be parsed or written.
    #[error("document store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Constraint violation (e.g. duplicate product id).
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Storage contract shared by both backends.
///
/// Catalog mutations are idempotent no-ops on unknown ids, except
/// `add_product`, which fails with [`StoreError::Conflict`] when the id is
/// already taken. `create_purchase` is all-or-nothing: either the purchase
/// and every one of its items are durably recorded, or nothing is.
#[async_trait]
pub trait Store: Send + Sync {
    /// All products, ordered by id.
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Products flagged for the homepage reel.
    async fn featured_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Look up one product.
    async fn get_product(&self, id: &str) -> Result<Option<Product>, StoreError>;

    /// Add a product to the catalog.
    async fn add_product(&self, product: Product) -> Result<(), StoreError>;

    /// Delete a product. Unknown ids are a no-op.
    async fn remove_product(&self, id: &str) -> Result<(), StoreError>;

    /// Flip a product's featured flag. Unknown ids are a no-op.
    async fn toggle_featured(&self, id: &str) -> Result<(), StoreError>;

    /// Seed the demo catalog if the store holds no products at all.
    ///
    /// Returns `true` if products were inserted.
    async fn seed_demo_products(&self) -> Result<bool, StoreError>;

    /// Persist a purchase with one item per cart line.
    ///
    /// Allocates an id strictly greater than every previously allocated
    /// purchase id and computes the total from the cart snapshot.
    async fn create_purchase(
        &self,
        contact: &ContactInfo,
        cart: &Cart,
    ) -> Result<Purchase, StoreError>;

    /// Fetch a purchase and its items.
    async fn get_purchase(
        &self,
        id: PurchaseId,
    ) -> Result<Option<(Purchase, Vec<PurchaseItem>)>, StoreError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Shared handle to the selected backend.
pub type DynStore = Arc<dyn Store>;

/// Construct the backend named by the configuration.
///
/// # Errors
///
/// Returns an error if the document store cannot be opened or the database
/// pool cannot be established.
pub async fn connect(config: &StoreConfig) -> Result<DynStore, StoreError> {
    match &config.backend {
        StoreBackend::File { data_dir } => {
            let store = FileStore::open(data_dir).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Postgres { database_url } => {
            let pool = postgres::create_pool(database_url).await?;
            Ok(Arc::new(PgStore::new(pool)))
        }
    }
}

/// The fixed demo catalog, seeded into an empty store.
#[must_use]
pub fn demo_products() -> Vec<Product> {
    vec![
        Product {
            id: "p1".to_owned(),
            name: "Solar Panel 320W".to_owned(),
            description: "High-efficiency monocrystalline panel".to_owned(),
            price: Decimal::new(18900, 2),
            image: "images/product1.svg".to_owned(),
            featured: true,
        },
        Product {
            id: "p2".to_owned(),
            name: "Hybrid Inverter".to_owned(),
            description: "Smart inverter with battery support".to_owned(),
            price: Decimal::new(49900, 2),
            image: "images/product2.svg".to_owned(),
            featured: true,
        },
        Product {
            id: "p3".to_owned(),
            name: "4K Security Camera".to_owned(),
            description: "Weatherproof 4K camera with night vision".to_owned(),
            price: Decimal::new(12900, 2),
            image: "images/product3.svg".to_owned(),
            featured: true,
        },
        Product {
            id: "p4".to_owned(),
            name: "Battery 10kWh".to_owned(),
            description: "Reliable energy storage for solar systems".to_owned(),
            price: Decimal::new(89900, 2),
            image: "images/product1.svg".to_owned(),
            featured: false,
        },
    ]
}
