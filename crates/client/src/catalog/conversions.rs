//! Wire-format types for the catalog REST API and their conversions into
//! domain types.
//!
//! The backend serves camelCase JSON with a page envelope of
//! `{products, total, skip, limit}`. Wire structs stay private to this
//! module; everything leaving it is a `trolley_core` type.

use rust_decimal::Decimal;
use serde::Deserialize;
use trolley_core::{CategorySlug, Product, ProductId};

/// One page of catalog products as returned by the backend.
#[derive(Debug, Deserialize)]
pub(super) struct WirePage {
    pub products: Vec<WireProduct>,
    #[allow(dead_code)]
    pub total: Option<u64>,
    #[allow(dead_code)]
    pub skip: Option<u64>,
    #[allow(dead_code)]
    pub limit: Option<u64>,
}

/// A product as serialized on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireProduct {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub discount_percentage: Decimal,
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i32,
}

pub(super) fn convert_product(wire: WireProduct) -> Product {
    Product {
        id: ProductId::new(wire.id),
        title: wire.title,
        description: wire.description,
        price: wire.price,
        discount_percentage: wire.discount_percentage,
        category: CategorySlug::new(&wire.category),
        brand: wire.brand,
        thumbnail: wire.thumbnail,
        images: wire.images,
        rating: wire.rating,
        stock: wire.stock,
    }
}

pub(super) fn convert_page(page: WirePage) -> Vec<Product> {
    page.products.into_iter().map(convert_product).collect()
}
