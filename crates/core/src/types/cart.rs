//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// One row in a user's cart, uniquely keyed by product id.
///
/// The product is snapshotted in full at add time, so the line renders
/// (and prices) without a catalog lookup even if the catalog changes later.
/// Invariant: `quantity >= 1` for as long as the line exists; a quantity
/// reaching zero deletes the line instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product snapshot taken when the line was created.
    pub product: Product,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Create a line item. Returns `None` if `quantity` is zero.
    #[must_use]
    pub fn new(product: Product, quantity: u32) -> Option<Self> {
        if quantity == 0 {
            return None;
        }
        Some(Self { product, quantity })
    }

    /// Product id this line is keyed by.
    #[must_use]
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Line total at the snapshotted unit price.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}
