//! In-memory storage backend, used in tests and for running the
//! service without a database file.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        RwLock,
    },
};

use async_trait::async_trait;
use orderdesk_core::{NewOrder, Order, OrderId, OrderStore, StorageError};

pub struct MemoryStore {
    orders: RwLock<BTreeMap<OrderId, Order>>,
    id_counter: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(BTreeMap::new()),
            id_counter: AtomicI64::new(1),
        }
    }

    fn next_id(&self) -> OrderId {
        self.id_counter.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn list_orders(&self) -> Result<Vec<Order>, StorageError> {
        Ok(self.orders.read().unwrap().values().cloned().collect())
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, StorageError> {
        let order = order.into_order(self.next_id());
        self.orders
            .write()
            .unwrap()
            .insert(order.id, order.clone());
        Ok(order)
    }

    async fn get_order(&self, id: OrderId) -> Result<Order, StorageError> {
        self.orders
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(StorageError::OrderNotFound(id))
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), StorageError> {
        self.orders
            .write()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::OrderNotFound(id))
    }
}
