//! Order lifecycle management.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use trolley_core::{Order, OrderDraft, OrderId, OrderStatus, PaymentMethod};

use crate::auth::AuthProvider;
use crate::store::{StoreError, UserDocumentStore};

/// Errors surfaced by order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// No user is signed in.
    #[error("not signed in")]
    Unauthenticated,

    /// Checkout requires a non-blank delivery address.
    #[error("delivery address must not be blank")]
    BlankAddress,

    /// The requested status change is not a legal transition.
    #[error("illegal order status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The remote store rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Creates orders at checkout and reads back the user's order history.
///
/// Orders are created in `Pending` with a creation timestamp and a
/// store-assigned id; afterwards only the status moves, and only along the
/// legal transition graph. The fulfillment backend drives most
/// transitions; this manager merely refuses to persist an illegal one.
pub struct OrderLifecycleManager<S, A> {
    store: S,
    auth: A,
}

impl<S: UserDocumentStore, A: AuthProvider> OrderLifecycleManager<S, A> {
    /// Create a manager.
    #[must_use]
    pub fn new(store: S, auth: A) -> Self {
        Self { store, auth }
    }

    /// Create a new order from the checkout form.
    ///
    /// Validates before any remote call: a signed-in user and a non-blank
    /// delivery address are required. The created order is returned with
    /// its store-assigned id already stamped.
    ///
    /// # Errors
    ///
    /// [`OrderError::Unauthenticated`] or [`OrderError::BlankAddress`]
    /// (both without touching the store); [`OrderError::Store`] if the
    /// remote create fails.
    #[instrument(skip(self, delivery_address))]
    pub async fn confirm_order(
        &self,
        payment_method: PaymentMethod,
        delivery_address: &str,
    ) -> Result<Order, OrderError> {
        let user = self.auth.current_user().ok_or(OrderError::Unauthenticated)?;
        let address = delivery_address.trim();
        if address.is_empty() {
            return Err(OrderError::BlankAddress);
        }

        let draft = OrderDraft {
            user_id: user,
            payment_method,
            order_date: Utc::now(),
            status: OrderStatus::Pending,
            delivery_address: address.to_string(),
        };

        let order = self.store.create_order(draft).await?;
        debug!(order_id = %order.id, "order created");
        Ok(order)
    }

    /// The user's orders, most recent first.
    ///
    /// Unauthenticated sessions and read failures both yield an empty
    /// list.
    #[instrument(skip(self))]
    pub async fn fetch_orders(&self) -> Vec<Order> {
        let Some(user) = self.auth.current_user() else {
            return Vec::new();
        };

        match self.store.orders(&user).await {
            Ok(mut orders) => {
                orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
                orders
            }
            Err(err) => {
                warn!(error = %err, "orders read failed, degrading to empty list");
                Vec::new()
            }
        }
    }

    /// Move an order to `next` if the transition is legal.
    ///
    /// # Errors
    ///
    /// [`OrderError::Unauthenticated`] without a user;
    /// [`OrderError::InvalidTransition`] if the stored order cannot move to
    /// `next` (nothing is written); [`OrderError::Store`] if the order is
    /// unknown or the write fails.
    #[instrument(skip(self), fields(order_id = %order, next = %next))]
    pub async fn advance_status(
        &self,
        order: &OrderId,
        next: OrderStatus,
    ) -> Result<(), OrderError> {
        let user = self.auth.current_user().ok_or(OrderError::Unauthenticated)?;

        let current = self.store.get_order(&user, order).await?;
        if !current.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: current.status,
                to: next,
            });
        }

        self.store.update_order_status(&user, order, next).await?;
        debug!(from = %current.status, "order status advanced");
        Ok(())
    }
}
