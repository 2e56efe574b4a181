//! Key-value storage backends.
//!
//! [`LocalStore`] persists to the browser's localStorage so state survives
//! page reloads. [`MemoryStore`] keeps everything in a map and backs host-side
//! tests.

use std::cell::RefCell;
use std::collections::HashMap;

use super::dom;
use crate::core::error::CacheError;

/// Synchronous string key-value store.
pub trait KeyValueStore {
    /// Get the raw value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

/// localStorage-backed store, scoped to the page origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let storage = dom::local_storage()?;
        storage.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let storage = dom::local_storage().ok_or(CacheError::StorageUnavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| CacheError::WriteFailed)
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
