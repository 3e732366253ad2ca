//! Trolley Core - Shared types library.
//!
//! This crate provides the domain types consumed by the `trolley-client`
//! synchronization engine.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no store
//! access. Every value here is either read from the remote catalog or
//! round-tripped through the per-user document store, so the types carry
//! their `serde` representations alongside the domain invariants (order
//! status transitions, slug normalization, cart line arithmetic).
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, products, cart lines, orders, and category slugs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
