//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use rust_decimal::Decimal;
use tokio::sync::Semaphore;
use trolley_client::catalog::{CatalogError, CatalogSource};
use trolley_core::{CategorySlug, Product, ProductId};

/// Initialize test logging once; respects `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a test product.
pub fn product(id: i32, title: &str, category: &str, price: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        description: format!("{title} description"),
        price: Decimal::from(price),
        discount_percentage: Decimal::ZERO,
        category: CategorySlug::new(category),
        brand: "Acme".to_string(),
        thumbnail: format!("https://cdn.test/{id}.jpg"),
        images: vec![],
        rating: 4.0,
        stock: 100,
    }
}

/// Build `count` products in one category with sequential ids starting at 1.
pub fn catalog_of(count: i32, category: &str) -> Vec<Product> {
    (1..=count)
        .map(|id| product(id, &format!("Product {id}"), category, i64::from(id)))
        .collect()
}

struct StaticCatalogInner {
    products: Vec<Product>,
    calls: AtomicU32,
    fail_next: AtomicBool,
    /// When gated, `list_products` blocks until a permit is released.
    gate: Option<Semaphore>,
}

/// Deterministic in-memory `CatalogSource`.
///
/// Serves slices of a fixed product list, counts calls, and can fail or
/// block on demand so pager edge cases are reproducible.
#[derive(Clone)]
pub struct StaticCatalog {
    inner: Arc<StaticCatalogInner>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            inner: Arc::new(StaticCatalogInner {
                products,
                calls: AtomicU32::new(0),
                fail_next: AtomicBool::new(false),
                gate: None,
            }),
        }
    }

    /// A catalog whose `list_products` blocks until [`Self::release`].
    pub fn gated(products: Vec<Product>) -> Self {
        Self {
            inner: Arc::new(StaticCatalogInner {
                products,
                calls: AtomicU32::new(0),
                fail_next: AtomicBool::new(false),
                gate: Some(Semaphore::new(0)),
            }),
        }
    }

    /// Let `count` gated requests proceed.
    pub fn release(&self, count: usize) {
        if let Some(gate) = &self.inner.gate {
            gate.add_permits(count);
        }
    }

    /// Make the next `list_products` call fail.
    pub fn fail_next(&self) {
        self.inner.fail_next.store(true, Ordering::SeqCst);
    }

    /// How many `list_products` calls were issued.
    pub fn calls(&self) -> u32 {
        self.inner.calls.load(Ordering::SeqCst)
    }
}

impl CatalogSource for StaticCatalog {
    async fn list_products(
        &self,
        limit: u32,
        skip: u32,
        category: Option<&CategorySlug>,
    ) -> Result<Vec<Product>, CatalogError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.inner.gate {
            let permit = gate.acquire().await.expect("gate closed");
            permit.forget();
        }

        if self.inner.fail_next.swap(false, Ordering::SeqCst) {
            return Err(CatalogError::Status {
                status: 500,
                body: "injected catalog failure".to_string(),
            });
        }

        Ok(self
            .inner
            .products
            .iter()
            .filter(|p| category.is_none_or(|slug| p.category == *slug))
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn list_categories(&self) -> Result<Vec<CategorySlug>, CatalogError> {
        let mut categories: Vec<CategorySlug> = self
            .inner
            .products
            .iter()
            .map(|p| p.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.inner
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("product {id}")))
    }
}
