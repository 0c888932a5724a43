//! Purchase records written at checkout.

use chrono::{DateTime, Utc};
use jng_core::{PurchaseId, PurchaseItemId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A finalized order.
///
/// Immutable once created. `total` is the cart total computed at checkout
/// time; the contact fields are a snapshot of the submitted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    /// Monotonically increasing id, unique across all purchases.
    pub id: PurchaseId,
    pub name: String,
    pub email: String,
    pub address: String,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

/// One line item of a purchase.
///
/// A denormalized snapshot of a cart line at checkout time, decoupled from
/// any later catalog changes. Every item references the purchase created in
/// the same checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    pub id: PurchaseItemId,
    pub purchase_id: PurchaseId,
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub qty: i32,
    pub image: String,
}
