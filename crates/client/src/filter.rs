//! Pure, synchronous product filtering and sorting.
//!
//! Re-derives the visible product list from the pager's accumulated
//! snapshot plus user-chosen predicates. No remote interaction, no side
//! effects: identical inputs always yield an identical ordered output.

use std::collections::HashSet;

use trolley_core::{CategorySlug, Product};

/// Sort applied after filtering.
///
/// `InputOrder` preserves the accumulated fetch order. All sorts are
/// stable, so equal keys keep their relative input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    InputOrder,
    PriceAscending,
    PriceDescending,
    RatingDescending,
}

/// User-chosen predicates over the accumulated product list.
///
/// Predicates compose by logical AND, applied text -> category -> brand,
/// then the sort. Empty query and empty brand set each mean "no filter".
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Free-text query, matched case-insensitively against titles.
    pub query: String,
    /// Category filter, compared by canonical slug equality.
    pub category: Option<CategorySlug>,
    /// Keep only these brands; empty means no brand filter.
    pub brands: HashSet<String>,
    /// Ordering of the filtered output.
    pub sort: ProductSort,
}

impl ProductFilter {
    /// Apply the filter to `products`, producing a new ordered list.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let query = self.query.trim().to_lowercase();

        let mut filtered: Vec<Product> = products
            .iter()
            .filter(|product| {
                query.is_empty() || product.title.to_lowercase().contains(&query)
            })
            .filter(|product| {
                self.category
                    .as_ref()
                    .is_none_or(|slug| product.category == *slug)
            })
            .filter(|product| self.brands.is_empty() || self.brands.contains(&product.brand))
            .cloned()
            .collect();

        match self.sort {
            ProductSort::InputOrder => {}
            ProductSort::PriceAscending => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
            ProductSort::PriceDescending => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
            ProductSort::RatingDescending => {
                filtered.sort_by(|a, b| b.rating.total_cmp(&a.rating));
            }
        }

        filtered
    }
}
