//! JSON-document storage backend.
//!
//! The whole store is one document (`db.json`) in the configured data
//! directory, guarded by an async `RwLock`. Every mutation stages a copy of
//! the document, writes it to a temp file, and renames it over the live file
//! before publishing the copy to memory. The rename is the commit point:
//! a failure at any earlier step leaves both disk and memory untouched, so a
//! checkout can never record a purchase without its items (or vice versa).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use jng_core::{Cart, ContactInfo, PurchaseId, PurchaseItemId};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{Store, StoreError, demo_products};
use crate::models::{Product, Purchase, PurchaseItem};

/// Document file name inside the data directory.
const DB_FILE: &str = "db.json";

/// On-disk shape of the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Document {
    products: Vec<Product>,
    purchases: Vec<Purchase>,
    purchase_items: Vec<PurchaseItem>,
}

/// Document-store backend.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    doc: RwLock<Document>,
}

impl FileStore {
    /// Open (or create) the document store under `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, or the existing
    /// document cannot be read or parsed.
    pub async fn open(data_dir: &Path) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(data_dir).await?;
        let path = data_dir.join(DB_FILE);

        let doc = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let doc = Document::default();
                persist(&path, &doc).await?;
                doc
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            doc: RwLock::new(doc),
        })
    }

    /// Apply `op` to a staged copy of the document and commit it.
    ///
    /// The staged copy is only published to memory after the on-disk rename
    /// succeeds, keeping disk and memory in lockstep.
    async fn commit<T>(
        &self,
        op: impl FnOnce(&mut Document) -> Result<T, StoreError> + Send,
    ) -> Result<T, StoreError> {
        let mut guard = self.doc.write().await;
        let mut staged = guard.clone();
        let value = op(&mut staged)?;
        persist(&self.path, &staged).await?;
        *guard = staged;
        Ok(value)
    }
}

/// Serialize the document to a temp file and rename it over the live file.
async fn persist(path: &Path, doc: &Document) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(doc)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl Store for FileStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.doc.read().await.products.clone())
    }

    async fn featured_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .doc
            .read()
            .await
            .products
            .iter()
            .filter(|p| p.featured)
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>, StoreError> {
        Ok(self
            .doc
            .read()
            .await
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn add_product(&self, product: Product) -> Result<(), StoreError> {
        self.commit(|doc| {
            if doc.products.iter().any(|p| p.id == product.id) {
                return Err(StoreError::Conflict(format!(
                    "product id {} already exists",
                    product.id
                )));
            }
            doc.products.push(product);
            Ok(())
        })
        .await
    }

    async fn remove_product(&self, id: &str) -> Result<(), StoreError> {
        self.commit(|doc| {
            doc.products.retain(|p| p.id != id);
            Ok(())
        })
        .await
    }

    async fn toggle_featured(&self, id: &str) -> Result<(), StoreError> {
        self.commit(|doc| {
            if let Some(product) = doc.products.iter_mut().find(|p| p.id == id) {
                product.featured = !product.featured;
            }
            Ok(())
        })
        .await
    }

    async fn seed_demo_products(&self) -> Result<bool, StoreError> {
        if !self.doc.read().await.products.is_empty() {
            return Ok(false);
        }
        self.commit(|doc| {
            if !doc.products.is_empty() {
                return Ok(false);
            }
            doc.products.extend(demo_products());
            Ok(true)
        })
        .await
    }

    async fn create_purchase(
        &self,
        contact: &ContactInfo,
        cart: &Cart,
    ) -> Result<Purchase, StoreError> {
        self.commit(|doc| {
            let next_id = doc
                .purchases
                .iter()
                .map(|p| p.id.as_i64())
                .max()
                .unwrap_or(0)
                + 1;

            let purchase = Purchase {
                id: PurchaseId::new(next_id),
                name: contact.name().to_owned(),
                email: contact.email().to_owned(),
                address: contact.address().to_owned(),
                total: cart.total(),
                created_at: Utc::now(),
            };

            let mut next_item_id = doc
                .purchase_items
                .iter()
                .map(|i| i.id.as_i64())
                .max()
                .unwrap_or(0);
            for line in cart.lines() {
                next_item_id += 1;
                doc.purchase_items.push(PurchaseItem {
                    id: PurchaseItemId::new(next_item_id),
                    purchase_id: purchase.id,
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    price: line.price,
                    qty: i32::try_from(line.qty).unwrap_or(i32::MAX),
                    image: line.image.clone(),
                });
            }

            doc.purchases.push(purchase.clone());
            Ok(purchase)
        })
        .await
    }

    async fn get_purchase(
        &self,
        id: PurchaseId,
    ) -> Result<Option<(Purchase, Vec<PurchaseItem>)>, StoreError> {
        let doc = self.doc.read().await;
        let Some(purchase) = doc.purchases.iter().find(|p| p.id == id).cloned() else {
            return Ok(None);
        };
        let items = doc
            .purchase_items
            .iter()
            .filter(|item| item.purchase_id == id)
            .cloned()
            .collect();
        Ok(Some((purchase, items)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jng_core::CartLine;
    use rust_decimal::Decimal;

    use super::*;

    fn contact() -> ContactInfo {
        ContactInfo::new("Ana Macamo", "ana@example.com", "Av. 24 de Julho, Maputo")
            .expect("valid contact")
    }

    fn cart_with_panels(qty: u32) -> Cart {
        let mut cart = Cart::default();
        cart.add(CartLine {
            product_id: "p1".to_owned(),
            name: "Solar Panel 320W".to_owned(),
            price: Decimal::new(18900, 2),
            image: "images/product1.svg".to_owned(),
            qty,
        });
        cart
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).await.expect("open");

        assert!(store.seed_demo_products().await.expect("seed"));
        assert!(!store.seed_demo_products().await.expect("second seed"));
        assert_eq!(store.list_products().await.expect("list").len(), 4);
    }

    #[tokio::test]
    async fn test_duplicate_product_add_is_a_conflict() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).await.expect("open");
        store.seed_demo_products().await.expect("seed");

        let duplicate = demo_products().remove(0);
        let err = store.add_product(duplicate).await.expect_err("conflict");
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_toggle_and_remove_ignore_unknown_ids() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).await.expect("open");
        store.seed_demo_products().await.expect("seed");

        store.toggle_featured("p9").await.expect("toggle");
        store.remove_product("p9").await.expect("remove");
        assert_eq!(store.list_products().await.expect("list").len(), 4);

        store.toggle_featured("p4").await.expect("toggle p4");
        let p4 = store
            .get_product("p4")
            .await
            .expect("get")
            .expect("p4 exists");
        assert!(p4.featured);
    }

    #[tokio::test]
    async fn test_checkout_survives_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).await.expect("open");
        store.seed_demo_products().await.expect("seed");

        let purchase = store
            .create_purchase(&contact(), &cart_with_panels(2))
            .await
            .expect("create purchase");
        assert_eq!(purchase.id, PurchaseId::new(1));
        assert_eq!(purchase.total, Decimal::new(37800, 2));
        drop(store);

        let reopened = FileStore::open(dir.path()).await.expect("reopen");
        let (found, items) = reopened
            .get_purchase(purchase.id)
            .await
            .expect("get purchase")
            .expect("purchase exists");
        assert_eq!(found.total, purchase.total);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].qty, 2);
        assert_eq!(items[0].purchase_id, purchase.id);
    }

    #[tokio::test]
    async fn test_purchase_ids_increase_monotonically() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).await.expect("open");

        let first = store
            .create_purchase(&contact(), &cart_with_panels(1))
            .await
            .expect("first purchase");
        let second = store
            .create_purchase(&contact(), &cart_with_panels(3))
            .await
            .expect("second purchase");

        assert!(second.id > first.id);
        let (_, items) = store
            .get_purchase(second.id)
            .await
            .expect("get")
            .expect("exists");
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_purchase_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).await.expect("open");

        let missing = store
            .get_purchase(PurchaseId::new(99))
            .await
            .expect("lookup");
        assert!(missing.is_none());
    }
}
