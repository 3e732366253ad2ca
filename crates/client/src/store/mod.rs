//! Per-user remote document store.
//!
//! The store is keyed by user id, then by subcollection: `favorites`
//! (minimal product projections keyed by product id), `cart` (line items
//! keyed by product id), and `orders` (documents with store-assigned ids).
//! The engine consumes it through [`UserDocumentStore`] so synchronizers
//! are unit-testable against [`memory::InMemoryUserStore`]; the production
//! backend lives behind the same trait.

pub mod memory;

use thiserror::Error;
use trolley_core::{CartLine, FavoriteEntry, Order, OrderDraft, OrderId, OrderStatus, ProductId, UserId};

/// Errors that can occur when interacting with the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed document does not exist.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The store backend failed (network, server, serialization).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Document store scoped per authenticated user.
///
/// All operations address one user's subcollections. Callers pass the user
/// id explicitly: the store itself knows nothing about sessions.
pub trait UserDocumentStore {
    // =========================================================================
    // Favorites
    // =========================================================================

    /// All favorite entries for the user (empty if none were ever written).
    fn favorite_entries(
        &self,
        user: &UserId,
    ) -> impl Future<Output = Result<Vec<FavoriteEntry>, StoreError>> + Send;

    /// Upsert a favorite entry keyed by its product id.
    fn put_favorite(
        &self,
        user: &UserId,
        entry: &FavoriteEntry,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete a favorite by product id. Idempotent.
    fn delete_favorite(
        &self,
        user: &UserId,
        product: ProductId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    // =========================================================================
    // Cart
    // =========================================================================

    /// All cart line items for the user.
    fn cart_lines(
        &self,
        user: &UserId,
    ) -> impl Future<Output = Result<Vec<CartLine>, StoreError>> + Send;

    /// Create a new cart line keyed by its product id.
    fn insert_cart_line(
        &self,
        user: &UserId,
        line: &CartLine,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Atomically add `by` to an existing line's quantity.
    ///
    /// Fails with [`StoreError::NotFound`] if no line exists for the
    /// product; this is the signal to insert instead. The increment is a
    /// single store-side operation, never a read-then-write.
    fn increment_cart_quantity(
        &self,
        user: &UserId,
        product: ProductId,
        by: u32,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Overwrite an existing line's quantity (last write wins).
    ///
    /// Fails with [`StoreError::NotFound`] if no line exists.
    fn set_cart_quantity(
        &self,
        user: &UserId,
        product: ProductId,
        quantity: u32,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete a cart line by product id. Idempotent.
    fn delete_cart_line(
        &self,
        user: &UserId,
        product: ProductId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete every cart line for the user.
    fn clear_cart(&self, user: &UserId) -> impl Future<Output = Result<(), StoreError>> + Send;

    // =========================================================================
    // Orders
    // =========================================================================

    /// Create an order document.
    ///
    /// The store assigns the id and stamps it onto the returned order as a
    /// single atomic step; there is never a persisted order without its id.
    fn create_order(
        &self,
        draft: OrderDraft,
    ) -> impl Future<Output = Result<Order, StoreError>> + Send;

    /// Fetch one order by id.
    fn get_order(
        &self,
        user: &UserId,
        order: &OrderId,
    ) -> impl Future<Output = Result<Order, StoreError>> + Send;

    /// All orders for the user, in no particular order.
    fn orders(&self, user: &UserId)
    -> impl Future<Output = Result<Vec<Order>, StoreError>> + Send;

    /// Overwrite an order's status field.
    ///
    /// Transition legality is the caller's responsibility; the store only
    /// persists. Fails with [`StoreError::NotFound`] for unknown orders.
    fn update_order_status(
        &self,
        user: &UserId,
        order: &OrderId,
        status: OrderStatus,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
