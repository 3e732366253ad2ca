//! Order lifecycle against the in-memory document store.

use std::time::Duration;

use trolley_client::store::memory::InMemoryUserStore;
use trolley_client::store::{StoreError, UserDocumentStore};
use trolley_client::sync::{OrderError, OrderLifecycleManager};
use trolley_client::{AuthProvider, SessionAuth};
use trolley_core::{OrderId, OrderStatus, PaymentMethod, UserId};

fn manager() -> (
    OrderLifecycleManager<InMemoryUserStore, SessionAuth>,
    InMemoryUserStore,
    SessionAuth,
) {
    let store = InMemoryUserStore::new();
    let auth = SessionAuth::signed_in(UserId::new("uid-orders"));
    (
        OrderLifecycleManager::new(store.clone(), auth.clone()),
        store,
        auth,
    )
}

#[tokio::test]
async fn confirm_creates_a_pending_order_with_store_assigned_id() {
    let (manager, _, auth) = manager();

    let order = manager
        .confirm_order(PaymentMethod::CreditCard, "  1 Main Street  ")
        .await
        .unwrap();

    assert!(!order.id.as_str().is_empty());
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.delivery_address, "1 Main Street");
    assert_eq!(Some(order.user_id), auth.current_user());
}

#[tokio::test]
async fn blank_address_never_reaches_the_store() {
    let (manager, store, auth) = manager();

    for address in ["", "   ", "\t\n"] {
        assert!(matches!(
            manager
                .confirm_order(PaymentMethod::CashOnDelivery, address)
                .await,
            Err(OrderError::BlankAddress)
        ));
    }

    let user = auth.current_user().unwrap();
    assert!(store.orders(&user).await.unwrap().is_empty());
}

#[tokio::test]
async fn unauthenticated_confirm_fails_fast() {
    let manager = OrderLifecycleManager::new(InMemoryUserStore::new(), SessionAuth::new());
    assert!(matches!(
        manager
            .confirm_order(PaymentMethod::BankTransfer, "1 Main Street")
            .await,
        Err(OrderError::Unauthenticated)
    ));
}

#[tokio::test]
async fn orders_come_back_most_recent_first() {
    let (manager, _, _) = manager();

    let first = manager
        .confirm_order(PaymentMethod::CashOnDelivery, "1 Main Street")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = manager
        .confirm_order(PaymentMethod::CreditCard, "2 Oak Avenue")
        .await
        .unwrap();

    let orders = manager.fetch_orders().await;
    assert_eq!(orders.len(), 2);
    assert_eq!(orders.first().map(|o| o.id.clone()), Some(second.id));
    assert_eq!(orders.last().map(|o| o.id.clone()), Some(first.id));
}

#[tokio::test]
async fn unauthenticated_or_failing_fetch_yields_empty_history() {
    let (manager, store, auth) = manager();
    manager
        .confirm_order(PaymentMethod::CashOnDelivery, "1 Main Street")
        .await
        .unwrap();

    store.set_read_failures(true).await;
    assert!(manager.fetch_orders().await.is_empty());
    store.set_read_failures(false).await;

    auth.sign_out();
    assert!(manager.fetch_orders().await.is_empty());
}

#[tokio::test]
async fn status_advances_only_along_legal_transitions() {
    let (manager, _, _) = manager();
    let order = manager
        .confirm_order(PaymentMethod::CreditCard, "1 Main Street")
        .await
        .unwrap();

    // Skipping a state is rejected without a write.
    assert!(matches!(
        manager.advance_status(&order.id, OrderStatus::Shipped).await,
        Err(OrderError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Shipped,
        })
    ));

    manager
        .advance_status(&order.id, OrderStatus::Processing)
        .await
        .unwrap();
    manager
        .advance_status(&order.id, OrderStatus::Shipped)
        .await
        .unwrap();
    manager
        .advance_status(&order.id, OrderStatus::Delivered)
        .await
        .unwrap();

    // Delivered is terminal.
    assert!(matches!(
        manager
            .advance_status(&order.id, OrderStatus::Cancelled)
            .await,
        Err(OrderError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn cancellation_is_reachable_from_any_non_terminal_state() {
    let (manager, _, _) = manager();
    let order = manager
        .confirm_order(PaymentMethod::CashOnDelivery, "1 Main Street")
        .await
        .unwrap();

    manager
        .advance_status(&order.id, OrderStatus::Processing)
        .await
        .unwrap();
    manager
        .advance_status(&order.id, OrderStatus::Cancelled)
        .await
        .unwrap();

    let orders = manager.fetch_orders().await;
    assert_eq!(
        orders.first().map(|o| o.status),
        Some(OrderStatus::Cancelled)
    );

    // Nothing moves out of Cancelled.
    assert!(
        manager
            .advance_status(&order.id, OrderStatus::Processing)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn advancing_an_unknown_order_reports_not_found() {
    let (manager, _, _) = manager();
    let err = manager
        .advance_status(&OrderId::new("missing"), OrderStatus::Processing)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Store(StoreError::NotFound(_))));
}
