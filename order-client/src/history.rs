//! Past order history
//!
//! Newest-first list of archived orders, persisted as one JSON array under
//! a single key of a [`KeyValueStore`]. Every `add` rewrites the whole array
//! (O(n) per insert), which is fine for a personal order history but would
//! need an append log for large histories.

use parking_lot::RwLock;
use shared::PastOrder;
use std::sync::Arc;
use uuid::Uuid;

use crate::notify::{Notifier, Subscription};
use crate::storage::{KeyValueStore, StorageError};
use crate::{ClientError, ClientResult};

/// Storage key of the serialized history
pub const PAST_ORDERS_KEY: &str = "pastOrders";

/// Published after every successful `add`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryChanged {
    /// The order that was just archived
    pub order_id: Uuid,
    /// Number of past orders after the insert
    pub order_count: usize,
}

/// What `initialize` found in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryLoad {
    /// Nothing stored yet
    Missing,
    /// This many orders were restored
    Loaded(usize),
    /// Stored data was unreadable; history starts empty
    Corrupt,
}

/// Durable store of past orders
pub struct OrderHistoryStore {
    storage: Arc<dyn KeyValueStore>,
    orders: RwLock<Vec<PastOrder>>,
    notifier: Notifier<HistoryChanged>,
}

impl OrderHistoryStore {
    /// Create a store over `storage` and load what it holds
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        let store = Self {
            storage,
            orders: RwLock::new(Vec::new()),
            notifier: Notifier::new("history_changed"),
        };
        store.initialize();
        store
    }

    /// (Re)load the history from storage
    ///
    /// Never fails: missing data leaves the history empty, and unreadable
    /// data is logged and also leaves it empty.
    pub fn initialize(&self) -> HistoryLoad {
        let (orders, outcome) = match self.read_stored() {
            Ok(Some(orders)) => {
                let count = orders.len();
                tracing::info!(count, "Order history loaded");
                (orders, HistoryLoad::Loaded(count))
            }
            Ok(None) => {
                tracing::debug!("No stored order history");
                (Vec::new(), HistoryLoad::Missing)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Order history unreadable, starting empty");
                (Vec::new(), HistoryLoad::Corrupt)
            }
        };

        *self.orders.write() = orders;
        outcome
    }

    fn read_stored(&self) -> ClientResult<Option<Vec<PastOrder>>> {
        let Some(bytes) = self.storage.get(PAST_ORDERS_KEY)? else {
            return Ok(None);
        };
        let orders = serde_json::from_slice(&bytes).map_err(ClientError::PersistenceDecode)?;
        Ok(Some(orders))
    }

    /// Archive `order` as the newest entry and persist the full history
    ///
    /// The in-memory insert is kept even when the write fails, so memory and
    /// storage can differ until the next successful write. The failure is
    /// returned as `PersistenceWrite` and no notification is sent.
    ///
    /// The write guard is held through the storage write, so concurrent adds
    /// reach storage in the same order as they reach memory.
    pub fn add(&self, order: PastOrder) -> ClientResult<()> {
        let order_id = order.id();
        let (written, order_count) = {
            let mut orders = self.orders.write();
            orders.insert(0, order);
            let written = serde_json::to_vec(&*orders)
                .map_err(StorageError::from)
                .and_then(|bytes| self.storage.put(PAST_ORDERS_KEY, &bytes));
            (written, orders.len())
        };

        if let Err(e) = written {
            tracing::error!(order_id = %order_id, error = %e, "Failed to persist order history");
            return Err(ClientError::PersistenceWrite(e));
        }

        tracing::info!(order_id = %order_id, order_count, "Order archived");
        self.notifier.publish(&HistoryChanged {
            order_id,
            order_count,
        });
        Ok(())
    }

    /// Past orders, newest first
    pub fn list(&self) -> Vec<PastOrder> {
        self.orders.read().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<PastOrder> {
        self.orders.read().iter().find(|order| order.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.orders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.read().is_empty()
    }

    /// Observe archived orders
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&HistoryChanged) + Send + Sync + 'static,
    {
        self.notifier.subscribe(callback)
    }
}
