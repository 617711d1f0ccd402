use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewOrder, Order, OrderId};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

/// Persistence client for orders. Each method is one unit of work
/// against the backing store; commit happens before the call returns.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Fetch all orders, in the backend's default order.
    async fn list_orders(&self) -> Result<Vec<Order>, StorageError>;

    /// Persist a new order and return it with its assigned id.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StorageError>;

    /// Fetch a single order by id.
    async fn get_order(&self, id: OrderId) -> Result<Order, StorageError>;

    /// Remove an order by id. Fails with `OrderNotFound` when no row exists.
    async fn delete_order(&self, id: OrderId) -> Result<(), StorageError>;
}
