//! redb-based device-local cache
//!
//! A single key-value table mapping string keys to JSON-serialized values.
//!
//! | Key | Value |
//! |-----|-------|
//! | `userIssues` | `Vec<LocalIssueRecord>`, newest first |
//! | `civic_image_{millis}` | photo reference (URI string) |
//! | `lastImageKey` | key of the most recently attached photo |
//!
//! No schema versioning: entries that fail to parse surface as
//! [`StoreError::Serialization`] and callers decide how to degrade.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::LocalIssueRecord;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// key = cache key, value = JSON bytes
const KV_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

pub const USER_ISSUES_KEY: &str = "userIssues";
pub const LAST_IMAGE_KEY: &str = "lastImageKey";
pub const IMAGE_KEY_PREFIX: &str = "civic_image_";

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
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

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Blocking task failed: {0}")]
    Task(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Device-local key-value cache backed by redb
#[derive(Clone)]
pub struct LocalStore {
    db: Arc<Database>,
}

impl LocalStore {
    /// Open or create the cache at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Database::create(path)?)
    }

    /// Open an in-memory cache (tests, throwaway sessions)
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?)
    }

    fn init(db: Database) -> StoreResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Raw Operations ==========

    pub fn get_raw(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    pub fn put_raw(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove a key, returning whether it existed
    pub fn remove(&self, key: &str) -> StoreResult<bool> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.remove(key)?.is_some()
        };
        write_txn.commit()?;
        Ok(existed)
    }

    /// All keys starting with `prefix`, in key order
    pub fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;
        let mut keys = Vec::new();
        for entry in table.range(prefix..)? {
            let (key, _) = entry?;
            let key = key.value();
            if !key.starts_with(prefix) {
                break;
            }
            keys.push(key.to_string());
        }
        Ok(keys)
    }

    // ========== JSON Operations ==========

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.put_raw(key, &bytes)
    }

    // ========== Local Issues ==========

    /// Locally submitted issues, newest first (empty when never written)
    pub fn load_user_issues(&self) -> StoreResult<Vec<LocalIssueRecord>> {
        Ok(self.get_json(USER_ISSUES_KEY)?.unwrap_or_default())
    }

    /// Insert a record at the head of the local issue list
    pub fn prepend_user_issue(&self, record: &LocalIssueRecord) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            let mut issues: Vec<LocalIssueRecord> = match table.get(USER_ISSUES_KEY)? {
                Some(guard) => serde_json::from_slice(guard.value())?,
                None => Vec::new(),
            };
            issues.insert(0, record.clone());
            let bytes = serde_json::to_vec(&issues)?;
            table.insert(USER_ISSUES_KEY, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // ========== Photo References ==========

    /// Store a photo reference under a fresh `civic_image_{millis}` key
    /// and remember it as the last attached photo
    pub fn save_photo_ref(&self, uri: &str) -> StoreResult<String> {
        let key = format!("{}{}", IMAGE_KEY_PREFIX, shared::util::now_millis());
        let uri_json = serde_json::to_vec(uri)?;
        let key_json = serde_json::to_vec(&key)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.insert(key.as_str(), uri_json.as_slice())?;
            table.insert(LAST_IMAGE_KEY, key_json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(key)
    }

    /// Reference of the most recently attached photo
    pub fn last_photo_ref(&self) -> StoreResult<Option<String>> {
        match self.get_json::<String>(LAST_IMAGE_KEY)? {
            Some(key) => self.get_json(&key),
            None => Ok(None),
        }
    }
}
