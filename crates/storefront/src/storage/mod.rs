//! Durable key-value storage.
//!
//! The storefront persists exactly two slots: the serialized cart under
//! `"cart"` and the auth token under `"token"`. The [`KvStore`] trait is the
//! seam between the stores and their backing medium; [`JsonFileStore`] plays
//! the role browser localStorage plays in the original drafts, and
//! [`MemoryStore`] backs tests and ephemeral runs.
//!
//! Writes are synchronous and best-effort. Readers must treat any read or
//! parse failure as "slot absent" - a corrupt slot is never fatal.

mod json_file;

pub use json_file::JsonFileStore;

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// Slot key for the serialized cart.
pub const CART_KEY: &str = "cart";

/// Slot key for the bearer access token.
pub const TOKEN_KEY: &str = "token";

/// Errors that can occur talking to the backing medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The in-memory store's lock was poisoned.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A durable string-to-string key-value store.
pub trait KvStore: Send + Sync {
    /// Read the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] only when the backing medium itself fails;
    /// an absent key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write cannot be performed.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the removal cannot be performed.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}
