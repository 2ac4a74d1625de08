//! redb-based storage for orders and restaurant aggregates
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | `Order` (JSON) | Order records |
//! | `restaurants` | `restaurant_id` | `Restaurant` (JSON) | Aggregate with menu, staff, reservations |
//! | `gateway_refs` | `gateway_order_ref` | `order_id` | Payment callback lookup |
//!
//! # Atomicity
//!
//! redb admits a single write transaction at a time. Every conditional
//! update (staff claim, booking, status write) reads its precondition and
//! writes its result inside the same write transaction, so two callers can
//! never both observe the same precondition.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::models::Restaurant;
use shared::order::{Order, OrderStatus};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Orders: key = order_id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Restaurants: key = restaurant_id, value = JSON-serialized Restaurant
const RESTAURANTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("restaurants");

/// Gateway reference index: key = gateway_order_ref, value = order_id
const GATEWAY_REFS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("gateway_refs");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    #[error("Restaurant already exists: {0}")]
    RestaurantExists(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage backed by redb
#[derive(Clone)]
pub struct Storage {
    db: Arc<Database>,
}

impl Storage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests and throwaway runs)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(RESTAURANTS_TABLE)?;
            let _ = write_txn.open_table(GATEWAY_REFS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open a read transaction on the orders table
    pub fn ping(&self) -> StorageResult<()> {
        let read_txn = self.db.begin_read()?;
        let _table = read_txn.open_table(ORDERS_TABLE)?;
        Ok(())
    }

    // ========== Order Operations ==========

    /// Insert an order and index its gateway reference
    pub fn insert_order(&self, order: &Order) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut orders = txn.open_table(ORDERS_TABLE)?;
            let value = serde_json::to_vec(order)?;
            orders.insert(order.id.as_str(), value.as_slice())?;

            let mut refs = txn.open_table(GATEWAY_REFS_TABLE)?;
            refs.insert(order.payment_intent_ref.as_str(), order.id.as_str())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get an order by id
    pub fn get_order(&self, order_id: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Resolve a gateway order reference to an order id
    pub fn find_order_by_gateway_ref(&self, gateway_ref: &str) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(GATEWAY_REFS_TABLE)?;
        Ok(table.get(gateway_ref)?.map(|v| v.value().to_string()))
    }

    /// All orders matching `filter`, newest first
    pub fn find_orders(&self, filter: impl Fn(&Order) -> bool) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let order: Order = serde_json::from_slice(value.value())?;
            if filter(&order) {
                orders.push(order);
            }
        }
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Read-modify-write one order inside a single write transaction
    ///
    /// `f` sees the current record and decides; on `Err` nothing is written.
    pub fn update_order<T, E>(
        &self,
        order_id: &str,
        f: impl FnOnce(&mut Order) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StorageError>,
    {
        let txn = self.db.begin_write().map_err(StorageError::from)?;
        let result = {
            let mut table = txn.open_table(ORDERS_TABLE).map_err(StorageError::from)?;
            let current = table.get(order_id).map_err(StorageError::from)?.map(|v| {
                serde_json::from_slice::<Order>(v.value())
            });
            let mut order = match current {
                Some(parsed) => parsed.map_err(StorageError::from)?,
                None => return Err(StorageError::OrderNotFound(order_id.to_string()).into()),
            };

            match f(&mut order) {
                Ok(value) => {
                    let bytes = serde_json::to_vec(&order).map_err(StorageError::from)?;
                    table
                        .insert(order_id, bytes.as_slice())
                        .map_err(StorageError::from)?;
                    Ok(value)
                }
                Err(e) => Err(e),
            }
        };

        match result {
            Ok(value) => {
                txn.commit().map_err(StorageError::from)?;
                Ok(value)
            }
            Err(e) => {
                txn.abort().map_err(StorageError::from)?;
                Err(e)
            }
        }
    }

    /// Delete every pending order created before `cutoff`
    ///
    /// Runs as one write transaction, so a concurrent confirmation either
    /// sees the order still pending (and wins) or finds it gone.
    pub fn remove_pending_before(&self, cutoff: i64) -> StorageResult<Vec<Order>> {
        let txn = self.db.begin_write()?;
        let mut removed = Vec::new();
        {
            let mut orders = txn.open_table(ORDERS_TABLE)?;
            let mut refs = txn.open_table(GATEWAY_REFS_TABLE)?;

            let mut stale = Vec::new();
            for result in orders.iter()? {
                let (_key, value) = result?;
                let order: Order = serde_json::from_slice(value.value())?;
                if order.status == OrderStatus::Pending && order.created_at < cutoff {
                    stale.push(order);
                }
            }

            for order in stale {
                orders.remove(order.id.as_str())?;
                refs.remove(order.payment_intent_ref.as_str())?;
                removed.push(order);
            }
        }
        txn.commit()?;
        Ok(removed)
    }

    // ========== Restaurant Operations ==========

    /// Insert a new restaurant aggregate
    pub fn insert_restaurant(&self, restaurant: &Restaurant) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(RESTAURANTS_TABLE)?;
            if table.get(restaurant.id.as_str())?.is_some() {
                return Err(StorageError::RestaurantExists(restaurant.id.clone()));
            }
            let value = serde_json::to_vec(restaurant)?;
            table.insert(restaurant.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get a restaurant aggregate by id
    pub fn get_restaurant(&self, restaurant_id: &str) -> StorageResult<Option<Restaurant>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RESTAURANTS_TABLE)?;

        match table.get(restaurant_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Read-modify-write one restaurant aggregate inside a single write transaction
    ///
    /// Same contract as [`Storage::update_order`]: `f` checks and mutates,
    /// and an `Err` leaves the stored aggregate untouched.
    pub fn update_restaurant<T, E>(
        &self,
        restaurant_id: &str,
        f: impl FnOnce(&mut Restaurant) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StorageError>,
    {
        let txn = self.db.begin_write().map_err(StorageError::from)?;
        let result = {
            let mut table = txn
                .open_table(RESTAURANTS_TABLE)
                .map_err(StorageError::from)?;
            let current = table.get(restaurant_id).map_err(StorageError::from)?.map(|v| {
                serde_json::from_slice::<Restaurant>(v.value())
            });
            let mut restaurant = match current {
                Some(parsed) => parsed.map_err(StorageError::from)?,
                None => {
                    return Err(StorageError::RestaurantNotFound(restaurant_id.to_string()).into());
                }
            };

            match f(&mut restaurant) {
                Ok(value) => {
                    restaurant.updated_at = shared::util::now_millis();
                    let bytes = serde_json::to_vec(&restaurant).map_err(StorageError::from)?;
                    table
                        .insert(restaurant_id, bytes.as_slice())
                        .map_err(StorageError::from)?;
                    Ok(value)
                }
                Err(e) => Err(e),
            }
        };

        match result {
            Ok(value) => {
                txn.commit().map_err(StorageError::from)?;
                Ok(value)
            }
            Err(e) => {
                txn.abort().map_err(StorageError::from)?;
                Err(e)
            }
        }
    }
}
