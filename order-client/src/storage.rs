//! redb-based local key-value storage

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Application storage table: key = slot name, value = serialized payload
const APP_STORAGE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("app_storage");

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

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Durable key-value slots
///
/// Each `put` replaces the whole value stored under the key.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if nothing was ever stored
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Replace the value under `key`
    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()>;
}

/// Local storage backed by a single redb file
#[derive(Clone)]
pub struct LocalStore {
    db: Arc<Database>,
}

impl LocalStore {
    /// Open or create database
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open in-memory database (nothing survives the process)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create the table up front so read transactions never miss it
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(APP_STORAGE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(APP_STORAGE_TABLE)?;

        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(APP_STORAGE_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key() {
        let store = LocalStore::open_in_memory().unwrap();
        assert!(store.get("pastOrders").unwrap().is_none());
    }

    #[test]
    fn test_put_replaces_value() {
        let store = LocalStore::open_in_memory().unwrap();
        store.put("slot", b"first").unwrap();
        store.put("slot", b"second").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some(&b"second"[..]));
    }

    #[test]
    fn test_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.redb");

        {
            let store = LocalStore::open(&path).unwrap();
            store.put("slot", b"[1,2,3]").unwrap();
        }

        let store = LocalStore::open(&path).unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some(&b"[1,2,3]"[..]));
    }
}
