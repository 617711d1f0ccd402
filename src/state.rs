//! The state container: an in-memory mirror of persisted orders plus
//! the three operations that keep it approximately in sync. Storage
//! owns the durable copy; the mirror is best-effort and process-local.
//! Views subscribe to change events instead of reaching into storage.

use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use orderdesk_core::{NewOrder, Order, OrderId, OrderStore, StorageError};

#[derive(Debug, Clone)]
pub enum OrderEvent {
    Loaded(usize),
    Saved(Order),
    Deleted(OrderId),
}

pub struct OrderState {
    store: Arc<dyn OrderStore>,
    orders: RwLock<Vec<Order>>,
    events: broadcast::Sender<OrderEvent>,
}

impl OrderState {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            store,
            orders: RwLock::new(Vec::new()),
            events,
        }
    }

    /// Fetch all orders and replace the in-memory list wholesale.
    pub async fn load(&self) -> Result<(), StorageError> {
        let orders = self.store.list_orders().await?;
        let count = orders.len();
        *self.orders.write().await = orders;
        self.emit(OrderEvent::Loaded(count));
        Ok(())
    }

    /// Persist a new order and append it (with its assigned id) to the list.
    pub async fn save(&self, order: NewOrder) -> Result<Order, StorageError> {
        let order = self.store.insert_order(order).await?;
        self.orders.write().await.push(order.clone());
        self.emit(OrderEvent::Saved(order.clone()));
        Ok(order)
    }

    /// Remove an order from storage, then from the list. The initial
    /// fetch fails with `OrderNotFound` when the id has no row; a
    /// missing id is an error, never a silent success.
    pub async fn delete(&self, id: OrderId) -> Result<(), StorageError> {
        let order = self.store.get_order(id).await?;
        self.store.delete_order(order.id).await?;
        self.orders.write().await.retain(|o| o.id != id);
        self.emit(OrderEvent::Deleted(id));
        Ok(())
    }

    /// Snapshot of the current list, for rendering.
    pub async fn orders(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: OrderEvent) {
        // send only fails when no view is subscribed
        let _ = self.events.send(event);
    }
}
