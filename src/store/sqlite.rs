//! SQLite-backed [`KeyValueStore`].
//!
//! Each store key is one row of `kv_store`, holding the whole list as JSON
//! text. A `set` is a single upsert, so each list is replaced atomically.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tracing::info;

use super::migrations;
use super::{KeyValueStore, StoreKey, Subscription, WatchCallback, WatcherRegistry};
use crate::types::errors::StoreError;

/// Store wrapping a `rusqlite::Connection`. Migrations run on open.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    watchers: WatcherRegistry,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at the given file path and runs migrations.
    ///
    /// # Errors
    /// Returns `StoreError::Database` if the connection cannot be established or migrations fail.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        migrations::run_all(&conn)?;
        info!(path = %path.as_ref().display(), "opened sqlite store");
        Ok(Self::from_connection(conn))
    }

    /// Opens an in-memory SQLite database and runs migrations.
    ///
    /// The data is discarded when the store is dropped.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        migrations::run_all(&conn)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            watchers: WatcherRegistry::new(),
        }
    }

    /// Returns the applied schema version.
    pub fn schema_version(&self) -> Result<i32, StoreError> {
        let conn = self.lock()?;
        Ok(migrations::get_schema_version(&conn))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn read(conn: &Connection, key: StoreKey) -> Result<Option<Value>, StoreError> {
        let text: Option<String> = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        match text {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: StoreKey) -> Result<Option<Value>, StoreError> {
        let conn = self.lock()?;
        Self::read(&conn, key)
    }

    fn set(&self, key: StoreKey, value: Value) -> Result<(), StoreError> {
        let text = serde_json::to_string(&value)?;
        let old = {
            let conn = self.lock()?;
            // A corrupt previous value must not block the overwrite.
            let old = match Self::read(&conn, key) {
                Ok(old) => old,
                Err(StoreError::Serialization(_)) => None,
                Err(e) => return Err(e),
            };
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key.as_str(), text, chrono::Utc::now().timestamp_millis()],
            )?;
            old
        };
        self.watchers
            .notify(key, &value, old.as_ref().unwrap_or(&Value::Null));
        Ok(())
    }

    fn watch(&self, key: StoreKey, callback: WatchCallback) -> Subscription {
        self.watchers.subscribe(key, callback)
    }
}
