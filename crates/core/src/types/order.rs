//! Orders and the order status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{OrderId, UserId};

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
    CreditCard,
    BankTransfer,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CashOnDelivery => write!(f, "Cash on Delivery"),
            Self::CreditCard => write!(f, "Credit Card"),
            Self::BankTransfer => write!(f, "Bank Transfer"),
        }
    }
}

/// Order fulfillment status.
///
/// Statuses move forward through
/// `Pending -> Processing -> Shipped -> Delivered`; `Cancelled` is reachable
/// from any non-terminal status. `Delivered` and `Cancelled` are terminal.
/// The fulfillment backend drives transitions; the client's obligation is to
/// persist and render statuses faithfully and never apply an invalid move
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether no further transition is defined from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Pending, Self::Processing)
            | (Self::Processing, Self::Shipped)
            | (Self::Shipped, Self::Delivered) => true,
            (current, Self::Cancelled) => !current.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Processing => write!(f, "Processing"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A persisted order.
///
/// `id`, `user_id`, and `order_date` are immutable once created; only
/// `status` changes afterwards, and only along legal transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned document id.
    pub id: OrderId,
    /// Owner of the order.
    pub user_id: UserId,
    /// Payment method chosen at checkout.
    pub payment_method: PaymentMethod,
    /// Creation timestamp, set once.
    pub order_date: DateTime<Utc>,
    /// Current fulfillment status.
    pub status: OrderStatus,
    /// Non-blank delivery address.
    pub delivery_address: String,
}

/// Order fields known before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub user_id: UserId,
    pub payment_method: PaymentMethod,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub delivery_address: String,
}

impl OrderDraft {
    /// Attach the store-assigned id, producing the persisted order.
    #[must_use]
    pub fn with_id(self, id: OrderId) -> Order {
        Order {
            id,
            user_id: self.user_id,
            payment_method: self.payment_method,
            order_date: self.order_date,
            status: self.status,
            delivery_address: self.delivery_address,
        }
    }
}
