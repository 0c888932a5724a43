//! Catalog product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Products are read-mostly: created at seed time or via the admin screen,
/// edited only through explicit admin actions. Cart lines and purchase items
/// copy the fields they need instead of referencing the live record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Stable, caller-chosen identifier (e.g. `p1`).
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price, non-negative.
    pub price: Decimal,
    /// Image path relative to the site root.
    pub image: String,
    /// Whether the product appears in the homepage reel.
    pub featured: bool,
}
