//! SQLite storage backend. One single-file database holds the orders
//! table; the connection is opened once and reused for the process
//! lifetime. Each trait method is one autocommitted unit of work.

use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use orderdesk_core::{NewOrder, Order, OrderId, OrderStore, StorageError};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()
        } else {
            Connection::open(path)
        }
        .map_err(|e| StorageError::Other(e.to_string()))?;

        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| StorageError::Other(e.to_string()))?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS orders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT,
                amount REAL NOT NULL
            );
            ",
        )
        .map_err(|e| StorageError::Other(e.to_string()))?;
        Ok(())
    }
}

fn row_to_order(row: &rusqlite::Row) -> Result<Order, rusqlite::Error> {
    Ok(Order {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        amount: row.get(3)?,
    })
}

#[async_trait]
impl OrderStore for SqliteStore {
    async fn list_orders(&self) -> Result<Vec<Order>, StorageError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT id, name, description, amount FROM orders")
            .map_err(|e| StorageError::Other(e.to_string()))?;
        let rows = stmt
            .query_map([], row_to_order)
            .map_err(|e| StorageError::Other(e.to_string()))?;

        let mut orders = Vec::new();
        for row in rows {
            orders.push(row.map_err(|e| StorageError::Other(e.to_string()))?);
        }
        Ok(orders)
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, StorageError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO orders (name, description, amount) VALUES (?1, ?2, ?3)",
            params![order.name, order.description, order.amount],
        )
        .map_err(|e| StorageError::Other(e.to_string()))?;

        let id = conn.last_insert_rowid();
        tracing::debug!(id, "order inserted");
        Ok(order.into_order(id))
    }

    async fn get_order(&self, id: OrderId) -> Result<Order, StorageError> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, name, description, amount FROM orders WHERE id = ?1",
            params![id],
            row_to_order,
        )
        .optional()
        .map_err(|e| StorageError::Other(e.to_string()))?
        .ok_or(StorageError::OrderNotFound(id))
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), StorageError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn
            .execute("DELETE FROM orders WHERE id = ?1", params![id])
            .map_err(|e| StorageError::Other(e.to_string()))?;
        if affected == 0 {
            return Err(StorageError::OrderNotFound(id));
        }
        tracing::debug!(id, "order deleted");
        Ok(())
    }
}
