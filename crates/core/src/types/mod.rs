//! Core types for the Trolley storefront client.

pub mod cart;
pub mod category;
pub mod favorite;
pub mod id;
pub mod order;
pub mod product;

pub use cart::CartLine;
pub use category::CategorySlug;
pub use favorite::FavoriteEntry;
pub use id::*;
pub use order::{Order, OrderDraft, OrderStatus, PaymentMethod};
pub use product::Product;
