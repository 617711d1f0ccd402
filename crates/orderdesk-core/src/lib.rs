//! Core types and traits for Orderdesk storage backends.
//!
//! This crate provides the `OrderStore` trait and the `Order` model,
//! enabling pluggable storage implementations in separate crates.

pub mod models;
pub mod storage;

// Re-export key types at crate root for convenience
pub use models::{NewOrder, Order, OrderId};
pub use storage::{OrderStore, StorageError};
