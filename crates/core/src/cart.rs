//! Session-scoped shopping cart.
//!
//! A cart is a list of product snapshots with quantities, owned by exactly one
//! browser session. Product name, price, and image are copied into the line at
//! add time so later catalog edits never change a cart (or a purchase made
//! from it).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product entry in a shopping cart.
///
/// Field names serialize in camelCase to match the storefront JSON API
/// (`productId`, etc.).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Id of the product this line was created from.
    pub product_id: String,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time.
    pub price: Decimal,
    /// Product image path at add time.
    pub image: String,
    /// Quantity, always at least 1.
    pub qty: u32,
}

/// A session's shopping cart.
///
/// Lines keep insertion order. The total is recomputed from the lines on every
/// read and never cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Add a product snapshot to the cart.
    ///
    /// If a line for the same product already exists its quantity is increased
    /// by the requested amount; otherwise the snapshot is appended as a new
    /// line. A requested quantity of 0 counts as 1.
    pub fn add(&mut self, snapshot: CartLine) {
        let qty = snapshot.qty.max(1);
        if let Some(line) = self.line_mut(&snapshot.product_id) {
            line.qty += qty;
        } else {
            self.lines.push(CartLine { qty, ..snapshot });
        }
    }

    /// Set the quantity of an existing line, clamped to a minimum of 1.
    ///
    /// Returns `false` if the cart has no line for `product_id`. Removal is a
    /// separate explicit action; setting 0 leaves a quantity of 1.
    pub fn set_qty(&mut self, product_id: &str, qty: u32) -> bool {
        match self.line_mut(product_id) {
            Some(line) => {
                line.qty = qty.max(1);
                true
            }
            None => false,
        }
    }

    /// Remove the line for `product_id`, if present.
    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Empty the cart. Called after a successful checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The cart total: sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(|line| line.price * Decimal::from(line.qty))
            .sum()
    }

    /// Total number of items across all lines (for the cart badge).
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.qty).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}
