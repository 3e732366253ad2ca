//! In-memory document store.
//!
//! Backs tests and offline development with the same contract as the
//! production store, including failure injection so synchronizer rollback
//! paths can be exercised deterministically.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::Mutex;
use trolley_core::{
    CartLine, FavoriteEntry, Order, OrderDraft, OrderId, OrderStatus, ProductId, UserId,
};
use uuid::Uuid;

use super::{StoreError, UserDocumentStore};

#[derive(Default)]
struct UserDocuments {
    favorites: BTreeMap<ProductId, FavoriteEntry>,
    cart: BTreeMap<ProductId, CartLine>,
    orders: Vec<Order>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, UserDocuments>,
    /// Number of upcoming writes that fail with `Unavailable`.
    pending_write_failures: u32,
    /// When set, every read fails with `Unavailable`.
    fail_reads: bool,
}

impl Inner {
    fn consume_write_failure(&mut self) -> Result<(), StoreError> {
        if self.pending_write_failures > 0 {
            self.pending_write_failures -= 1;
            return Err(StoreError::Unavailable("injected write failure".to_string()));
        }
        Ok(())
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("injected read failure".to_string()));
        }
        Ok(())
    }

    fn docs(&mut self, user: &UserId) -> &mut UserDocuments {
        self.users.entry(user.clone()).or_default()
    }
}

/// In-memory [`UserDocumentStore`].
///
/// Cheap to clone; all clones share the same documents.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` write operations fail with `Unavailable`.
    pub async fn inject_write_failures(&self, count: u32) {
        self.inner.lock().await.pending_write_failures = count;
    }

    /// Toggle failure of every read operation.
    pub async fn set_read_failures(&self, fail: bool) {
        self.inner.lock().await.fail_reads = fail;
    }
}

impl UserDocumentStore for InMemoryUserStore {
    async fn favorite_entries(&self, user: &UserId) -> Result<Vec<FavoriteEntry>, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.check_read()?;
        Ok(inner.docs(user).favorites.values().cloned().collect())
    }

    async fn put_favorite(&self, user: &UserId, entry: &FavoriteEntry) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.consume_write_failure()?;
        inner.docs(user).favorites.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn delete_favorite(&self, user: &UserId, product: ProductId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.consume_write_failure()?;
        inner.docs(user).favorites.remove(&product);
        Ok(())
    }

    async fn cart_lines(&self, user: &UserId) -> Result<Vec<CartLine>, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.check_read()?;
        Ok(inner.docs(user).cart.values().cloned().collect())
    }

    async fn insert_cart_line(&self, user: &UserId, line: &CartLine) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.consume_write_failure()?;
        inner.docs(user).cart.insert(line.product_id(), line.clone());
        Ok(())
    }

    async fn increment_cart_quantity(
        &self,
        user: &UserId,
        product: ProductId,
        by: u32,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.consume_write_failure()?;
        let line = inner
            .docs(user)
            .cart
            .get_mut(&product)
            .ok_or_else(|| StoreError::NotFound(format!("cart line {product}")))?;
        line.quantity += by;
        Ok(())
    }

    async fn set_cart_quantity(
        &self,
        user: &UserId,
        product: ProductId,
        quantity: u32,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.consume_write_failure()?;
        let line = inner
            .docs(user)
            .cart
            .get_mut(&product)
            .ok_or_else(|| StoreError::NotFound(format!("cart line {product}")))?;
        line.quantity = quantity;
        Ok(())
    }

    async fn delete_cart_line(&self, user: &UserId, product: ProductId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.consume_write_failure()?;
        inner.docs(user).cart.remove(&product);
        Ok(())
    }

    async fn clear_cart(&self, user: &UserId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.consume_write_failure()?;
        inner.docs(user).cart.clear();
        Ok(())
    }

    async fn create_order(&self, draft: OrderDraft) -> Result<Order, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.consume_write_failure()?;
        let user = draft.user_id.clone();
        let order = draft.with_id(OrderId::new(Uuid::new_v4().to_string()));
        inner.docs(&user).orders.push(order.clone());
        Ok(order)
    }

    async fn get_order(&self, user: &UserId, order: &OrderId) -> Result<Order, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.check_read()?;
        inner
            .docs(user)
            .orders
            .iter()
            .find(|candidate| candidate.id == *order)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("order {order}")))
    }

    async fn orders(&self, user: &UserId) -> Result<Vec<Order>, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.check_read()?;
        Ok(inner.docs(user).orders.clone())
    }

    async fn update_order_status(
        &self,
        user: &UserId,
        order: &OrderId,
        status: OrderStatus,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.consume_write_failure()?;
        let stored = inner
            .docs(user)
            .orders
            .iter_mut()
            .find(|candidate| candidate.id == *order)
            .ok_or_else(|| StoreError::NotFound(format!("order {order}")))?;
        stored.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use trolley_core::PaymentMethod;

    use super::*;

    fn user() -> UserId {
        UserId::new("uid-1")
    }

    fn entry(id: i32) -> FavoriteEntry {
        FavoriteEntry {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Decimal::ONE,
            thumbnail: String::new(),
        }
    }

    #[tokio::test]
    async fn test_favorites_upsert_and_delete() {
        let store = InMemoryUserStore::new();
        store.put_favorite(&user(), &entry(1)).await.unwrap();
        store.put_favorite(&user(), &entry(1)).await.unwrap();
        assert_eq!(store.favorite_entries(&user()).await.unwrap().len(), 1);

        store.delete_favorite(&user(), ProductId::new(1)).await.unwrap();
        // Deleting again is idempotent.
        store.delete_favorite(&user(), ProductId::new(1)).await.unwrap();
        assert!(store.favorite_entries(&user()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_increment_requires_existing_line() {
        let store = InMemoryUserStore::new();
        let err = store
            .increment_cart_quantity(&user(), ProductId::new(9), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_order_assigns_id() {
        let store = InMemoryUserStore::new();
        let order = store
            .create_order(OrderDraft {
                user_id: user(),
                payment_method: PaymentMethod::CreditCard,
                order_date: Utc::now(),
                status: trolley_core::OrderStatus::Pending,
                delivery_address: "1 Main St".to_string(),
            })
            .await
            .unwrap();
        assert!(!order.id.as_str().is_empty());

        let fetched = store.get_order(&user(), &order.id).await.unwrap();
        assert_eq!(fetched, order);
    }

    #[tokio::test]
    async fn test_injected_write_failure_is_consumed() {
        let store = InMemoryUserStore::new();
        store.inject_write_failures(1).await;
        assert!(store.put_favorite(&user(), &entry(1)).await.is_err());
        assert!(store.put_favorite(&user(), &entry(1)).await.is_ok());
    }
}
