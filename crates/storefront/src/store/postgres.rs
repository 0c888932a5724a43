//! `PostgreSQL` storage backend.
//!
//! Queries are bound at runtime so the crate builds without a live database.
//! Checkout wraps the purchase row and all of its item rows in a single
//! transaction; any failure rolls back to zero rows written.

use std::time::Duration;

use async_trait::async_trait;
use jng_core::{Cart, ContactInfo, PurchaseId};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{Store, StoreError, demo_products};
use crate::models::{Product, Purchase, PurchaseItem};

/// Embedded migrations from `crates/storefront/migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Relational backend over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, image, featured
             FROM product
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    async fn featured_products(&self) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, image, featured
             FROM product
             WHERE featured
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, image, featured
             FROM product
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn add_product(&self, product: Product) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO product (id, name, description, price, image, featured)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image)
        .bind(product.featured)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return StoreError::Conflict(format!("product id {} already exists", product.id));
            }
            StoreError::Database(e)
        })?;
        Ok(())
    }

    async fn remove_product(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn toggle_featured(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("UPDATE product SET featured = NOT featured WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn seed_demo_products(&self) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            return Ok(false);
        }

        for product in demo_products() {
            sqlx::query(
                "INSERT INTO product (id, name, description, price, image, featured)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(&product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(&product.image)
            .bind(product.featured)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn create_purchase(
        &self,
        contact: &ContactInfo,
        cart: &Cart,
    ) -> Result<Purchase, StoreError> {
        let mut tx = self.pool.begin().await?;

        let purchase = sqlx::query_as::<_, Purchase>(
            "INSERT INTO purchase (name, email, address, total)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, address, total, created_at",
        )
        .bind(contact.name())
        .bind(contact.email())
        .bind(contact.address())
        .bind(cart.total())
        .fetch_one(&mut *tx)
        .await?;

        for line in cart.lines() {
            sqlx::query(
                "INSERT INTO purchase_item (purchase_id, product_id, name, price, qty, image)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(purchase.id)
            .bind(&line.product_id)
            .bind(&line.name)
            .bind(line.price)
            .bind(i32::try_from(line.qty).unwrap_or(i32::MAX))
            .bind(&line.image)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(purchase)
    }

    async fn get_purchase(
        &self,
        id: PurchaseId,
    ) -> Result<Option<(Purchase, Vec<PurchaseItem>)>, StoreError> {
        let purchase = sqlx::query_as::<_, Purchase>(
            "SELECT id, name, email, address, total, created_at
             FROM purchase
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(purchase) = purchase else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, PurchaseItem>(
            "SELECT id, purchase_id, product_id, name, price, qty, image
             FROM purchase_item
             WHERE purchase_id = $1
             ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some((purchase, items)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
