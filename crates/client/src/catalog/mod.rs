//! Remote product catalog access and pagination.
//!
//! # Architecture
//!
//! - [`CatalogSource`] is the injected seam: the pager and the filtering
//!   tests run against in-memory implementations, production runs against
//!   [`HttpCatalogClient`]
//! - [`HttpCatalogClient`] speaks the catalog's REST pagination protocol
//!   with `reqwest`, caching immutable metadata (single products, the
//!   category list) via `moka`
//! - [`CatalogPager`] owns the accumulated, de-duplicated product view the
//!   UI scrolls through

mod conversions;
mod http;
mod pager;

pub use http::HttpCatalogClient;
pub use pager::{CatalogPager, PagerSnapshot};

use thiserror::Error;
use trolley_core::{CategorySlug, Product, ProductId};

/// Errors that can occur when talking to the remote catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (transport-level).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the catalog backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Catalog returned a non-success status.
    #[error("Catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// A paginated product catalog.
///
/// Pagination contract: a page with fewer than `limit` items (in
/// particular, an empty one) signals that the cursor has passed the last
/// product for the given category filter.
pub trait CatalogSource {
    /// Fetch one page of products at the given offset, optionally filtered
    /// by category.
    fn list_products(
        &self,
        limit: u32,
        skip: u32,
        category: Option<&CategorySlug>,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Fetch the category list.
    fn list_categories(&self) -> impl Future<Output = Result<Vec<CategorySlug>, CatalogError>> + Send;

    /// Fetch a single product by id.
    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;
}
