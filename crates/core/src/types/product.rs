//! Catalog product type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::CategorySlug;
use super::id::ProductId;

/// A product as served by the remote catalog.
///
/// Immutable once fetched: the engine never writes products back to the
/// catalog, it only snapshots them into cart lines and favorite entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-assigned stable identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Unit price, non-negative.
    pub price: Decimal,
    /// Discount percentage in `0..=100`.
    pub discount_percentage: Decimal,
    /// Canonical category slug.
    pub category: CategorySlug,
    /// Brand name; may be empty for unbranded items.
    pub brand: String,
    /// Primary image URL.
    pub thumbnail: String,
    /// Gallery image URLs, possibly empty.
    pub images: Vec<String>,
    /// Average rating in `0.0..=5.0`.
    pub rating: f64,
    /// Units in stock.
    pub stock: i32,
}

impl Product {
    /// Price after applying the discount percentage.
    #[must_use]
    pub fn discounted_price(&self) -> Decimal {
        let hundred = Decimal::from(100);
        self.price * (hundred - self.discount_percentage) / hundred
    }
}
