//! Favorite (wishlist) entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// Minimal product projection persisted when a product is favorited.
///
/// Just enough to render a wishlist row without a catalog round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// Catalog product id; doubles as the document key.
    pub id: ProductId,
    /// Display title at favorite time.
    pub title: String,
    /// Unit price at favorite time.
    pub price: Decimal,
    /// Primary image URL.
    pub thumbnail: String,
}

impl From<&Product> for FavoriteEntry {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            thumbnail: product.thumbnail.clone(),
        }
    }
}
