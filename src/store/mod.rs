//! Key-value persistence for the two bookmark lists.
//!
//! The core never talks to a concrete backend: repositories and the import
//! engine receive a `&dyn KeyValueStore` at construction. Two backends ship
//! with the crate:
//!
//! - [`MemoryStore`] keeps values in a `HashMap`, for tests and embedding.
//! - [`SqliteStore`] persists values as JSON text in a SQLite table.
//!
//! Every `set` replaces a whole list. There is no transaction spanning the
//! two keys and no compare-and-swap, so concurrent read-modify-write callers
//! follow last-write-wins.
//!
//! # Usage
//!
//! ```
//! use bookmark_keeper::store::{MemoryStore, Storage};
//!
//! let store = MemoryStore::new();
//! let storage = Storage::new(&store);
//! assert!(storage.bookmarks().unwrap().is_empty());
//! ```

pub mod memory;
pub mod migrations;
pub mod sqlite;

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::bookmark::Bookmark;
use crate::types::category::Category;
use crate::types::errors::StoreError;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// The named values a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Bookmarks,
    Categories,
}

impl StoreKey {
    /// Returns the persisted key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Bookmarks => "bookmarks",
            StoreKey::Categories => "categories",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change callback: `(new_value, old_value)`. A missing old value is `Null`.
pub type WatchCallback = Arc<dyn Fn(&Value, &Value) + Send + Sync>;

/// Trait implemented by persistence backends.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn get(&self, key: StoreKey) -> Result<Option<Value>, StoreError>;
    /// Atomically replaces the value and notifies watchers of `key`.
    fn set(&self, key: StoreKey, value: Value) -> Result<(), StoreError>;
    /// Registers a change callback. It stays active until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    fn watch(&self, key: StoreKey, callback: WatchCallback) -> Subscription;
}

struct Watcher {
    id: u64,
    key: StoreKey,
    callback: WatchCallback,
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    watchers: Vec<Watcher>,
}

/// Callback registry shared by the store backends.
#[derive(Default)]
pub struct WatcherRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl WatcherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a callback for `key`.
    pub fn subscribe(&self, key: StoreKey, callback: WatchCallback) -> Subscription {
        let id = match self.inner.lock() {
            Ok(mut inner) => {
                inner.next_id += 1;
                let id = inner.next_id;
                inner.watchers.push(Watcher { id, key, callback });
                id
            }
            Err(e) => {
                warn!(key = %key, error = %e, "watcher registry poisoned, callback not registered");
                0
            }
        };
        Subscription {
            registry: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Invokes every callback registered for `key`.
    ///
    /// Callbacks run after the registry lock is released, so a callback may
    /// itself subscribe or unsubscribe.
    pub fn notify(&self, key: StoreKey, new_value: &Value, old_value: &Value) {
        let callbacks: Vec<WatchCallback> = match self.inner.lock() {
            Ok(inner) => inner
                .watchers
                .iter()
                .filter(|w| w.key == key)
                .map(|w| Arc::clone(&w.callback))
                .collect(),
            Err(_) => return,
        };
        for callback in callbacks {
            callback(new_value, old_value);
        }
    }

    /// Number of active callbacks for `key`.
    pub fn watcher_count(&self, key: StoreKey) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.watchers.iter().filter(|w| w.key == key).count())
            .unwrap_or(0)
    }
}

/// Handle returned by [`KeyValueStore::watch`]. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes the callback"]
pub struct Subscription {
    registry: Weak<Mutex<RegistryInner>>,
    id: u64,
}

impl Subscription {
    /// Removes the callback. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            if let Ok(mut inner) = inner.lock() {
                inner.watchers.retain(|w| w.id != self.id);
            }
        }
    }
}

/// Typed access to the bookmark and category lists of a store.
///
/// A key that was never written reads as an empty list.
#[derive(Clone, Copy)]
pub struct Storage<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> Storage<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn bookmarks(&self) -> Result<Vec<Bookmark>, StoreError> {
        self.read_list(StoreKey::Bookmarks)
    }

    pub fn set_bookmarks(&self, bookmarks: &[Bookmark]) -> Result<(), StoreError> {
        self.write_list(StoreKey::Bookmarks, bookmarks)
    }

    pub fn categories(&self) -> Result<Vec<Category>, StoreError> {
        self.read_list(StoreKey::Categories)
    }

    pub fn set_categories(&self, categories: &[Category]) -> Result<(), StoreError> {
        self.write_list(StoreKey::Categories, categories)
    }

    /// Watches the bookmark list. Values that fail to decode are skipped.
    pub fn watch_bookmarks<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[Bookmark], &[Bookmark]) + Send + Sync + 'static,
    {
        self.watch_list(StoreKey::Bookmarks, callback)
    }

    /// Watches the category list. Values that fail to decode are skipped.
    pub fn watch_categories<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[Category], &[Category]) + Send + Sync + 'static,
    {
        self.watch_list(StoreKey::Categories, callback)
    }

    fn read_list<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Vec<T>, StoreError> {
        match self.store.get(key)? {
            Some(value) => decode_list(value),
            None => Ok(Vec::new()),
        }
    }

    fn write_list<T: Serialize>(&self, key: StoreKey, items: &[T]) -> Result<(), StoreError> {
        let value = serde_json::to_value(items)?;
        self.store.set(key, value)?;
        debug!(key = %key, count = items.len(), "list written");
        Ok(())
    }

    fn watch_list<T, F>(&self, key: StoreKey, callback: F) -> Subscription
    where
        T: DeserializeOwned + 'static,
        F: Fn(&[T], &[T]) + Send + Sync + 'static,
    {
        let wrapped: WatchCallback = Arc::new(move |new_value: &Value, old_value: &Value| {
            let new_list = decode_list::<T>(new_value.clone());
            let old_list = decode_list::<T>(old_value.clone());
            match (new_list, old_list) {
                (Ok(new_list), Ok(old_list)) => callback(&new_list, &old_list),
                (Err(e), _) | (_, Err(e)) => {
                    warn!(key = %key, error = %e, "skipping change notification with undecodable value");
                }
            }
        });
        self.store.watch(key, wrapped)
    }
}

fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, StoreError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(value)?)
}
