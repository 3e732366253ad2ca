//! Paginated catalog retrieval with an accumulated local view.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::{debug, warn};
use trolley_core::{CategorySlug, Product, ProductId};

use super::{CatalogError, CatalogSource};

/// How many products to request when looking up related items.
const RELATED_FETCH_LIMIT: u32 = 10;
/// How many related products to surface.
const RELATED_COUNT: usize = 3;

/// Read-only view of the pager for the UI to render.
#[derive(Debug, Clone)]
pub struct PagerSnapshot {
    /// Accumulated products in fetch order.
    pub products: Vec<Product>,
    /// Whether a page fetch is currently in flight.
    pub is_loading: bool,
    /// Whether the last page has been reached for the active filter.
    pub end_reached: bool,
}

struct PagerState {
    products: Vec<Product>,
    /// Product id -> index into `products`, for de-duplication.
    positions: HashMap<ProductId, usize>,
    skip: u32,
    loading: bool,
    end_reached: bool,
    category: Option<CategorySlug>,
    /// Bumped on every category reset; a fetch started under an older
    /// generation discards its result instead of applying it.
    generation: u64,
}

impl PagerState {
    fn reset(&mut self) {
        self.products.clear();
        self.positions.clear();
        self.skip = 0;
        self.loading = false;
        self.end_reached = false;
        self.generation += 1;
    }
}

/// Owns paginated retrieval state for the product catalog and merges
/// successive pages into a growing, de-duplicated product list.
///
/// The accumulated list is a best-effort cache of the remote catalog: a
/// failed page fetch leaves it untouched (and the offset unchanged, so a
/// retry re-requests the same page). Concurrent `fetch_next_page` calls
/// collapse into one request via the in-flight flag.
pub struct CatalogPager<C> {
    source: C,
    page_size: u32,
    state: Mutex<PagerState>,
}

impl<C: CatalogSource> CatalogPager<C> {
    /// Create a pager over `source` requesting `page_size` products per page.
    #[must_use]
    pub fn new(source: C, page_size: u32) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            state: Mutex::new(PagerState {
                products: Vec::new(),
                positions: HashMap::new(),
                skip: 0,
                loading: false,
                end_reached: false,
                category: None,
                generation: 0,
            }),
        }
    }

    /// Switch the active category filter.
    ///
    /// Category is a server-side filter, so the page cursor is invalid
    /// across categories: a change clears the accumulated list, resets the
    /// offset, and clears the end-of-data flag. Setting the same category
    /// again is a no-op. Any fetch in flight for the previous category has
    /// its eventual result discarded.
    pub async fn set_category_filter(&self, category: Option<CategorySlug>) {
        let mut state = self.state.lock().await;
        if state.category == category {
            return;
        }
        debug!(category = ?category, "category filter changed, resetting pager");
        state.reset();
        state.category = category;
    }

    /// Fetch the next page and append it to the accumulated list.
    ///
    /// No-op (without a network call) while a fetch is in flight or after
    /// end-of-data was reached. A page with fewer items than the page size
    /// signals the last page and sets end-of-data; a page with zero items
    /// additionally leaves the list unchanged. Otherwise items are appended
    /// (de-duplicated by id, last write wins) and the offset advances by
    /// the page size.
    ///
    /// # Errors
    ///
    /// Returns the catalog error on transport or server failure. The
    /// accumulated state is untouched in that case; the caller decides
    /// whether to retry.
    pub async fn fetch_next_page(&self) -> Result<(), CatalogError> {
        let (skip, category, generation) = {
            let mut state = self.state.lock().await;
            if state.loading || state.end_reached {
                return Ok(());
            }
            state.loading = true;
            (state.skip, state.category.clone(), state.generation)
        };

        let result = self
            .source
            .list_products(self.page_size, skip, category.as_ref())
            .await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            // Superseded by a category change; the reset already cleared
            // the loading flag, so just drop the stale page.
            debug!(skip, "discarding stale page from superseded fetch");
            return Ok(());
        }
        state.loading = false;

        let items = match result {
            Ok(items) => items,
            Err(err) => {
                warn!(skip, error = %err, "page fetch failed, keeping accumulated state");
                return Err(err);
            }
        };

        if items.is_empty() {
            debug!(skip, "empty page, end of data");
            state.end_reached = true;
            return Ok(());
        }

        // Fewer items than requested means the cursor passed the last
        // product; the partial page still gets merged below.
        if (items.len() as u64) < u64::from(self.page_size) {
            debug!(skip, received = items.len(), "short page, end of data");
            state.end_reached = true;
        }

        for item in items {
            if let Some(&pos) = state.positions.get(&item.id) {
                // Re-delivered id, last write wins.
                if let Some(slot) = state.products.get_mut(pos) {
                    *slot = item;
                }
            } else {
                let position = state.products.len();
                state.positions.insert(item.id, position);
                state.products.push(item);
            }
        }
        state.skip += self.page_size;

        Ok(())
    }

    /// Current accumulated view.
    pub async fn snapshot(&self) -> PagerSnapshot {
        let state = self.state.lock().await;
        PagerSnapshot {
            products: state.products.clone(),
            is_loading: state.loading,
            end_reached: state.end_reached,
        }
    }

    /// Products related to one being viewed: the first page of its
    /// category, minus the product itself, truncated to a handful.
    ///
    /// # Errors
    ///
    /// Returns the catalog error if the lookup fails.
    pub async fn related_products(
        &self,
        category: &CategorySlug,
        exclude: ProductId,
    ) -> Result<Vec<Product>, CatalogError> {
        let page = self
            .source
            .list_products(RELATED_FETCH_LIMIT, 0, Some(category))
            .await?;
        Ok(page
            .into_iter()
            .filter(|product| product.id != exclude)
            .take(RELATED_COUNT)
            .collect())
    }
}
