//! Durable key-value slots.
//!
//! [`Storage`] mirrors the browser's Web Storage API: string keys, string
//! values, synchronous access. The cart only ever touches one key, but the
//! seam stays general so tests can seed unrelated keys and corrupt data.

use std::collections::{BTreeSet, HashMap};

use thiserror::Error;
use tower_sessions::Session;

/// Largest value a session-backed slot accepts, matching the usual browser
/// local storage budget.
pub const MAX_VALUE_BYTES: usize = 5 * 1024 * 1024;

/// Errors raised by a storage backend when writing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The value does not fit in the backend's budget.
    #[error("storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },
}

/// A synchronous string key-value store.
pub trait Storage {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the write.
    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key does nothing.
    fn remove_item(&mut self, key: &str);
}

// =============================================================================
// In-memory storage
// =============================================================================

/// In-memory [`Storage`], used in tests and anywhere no durability is needed.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty, unlimited store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total bytes of all stored values.
    #[must_use]
    pub const fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Seed a raw value, bypassing the quota.
    #[must_use]
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Whether `key` currently holds a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            let needed = self.used_bytes_without(key) + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

// =============================================================================
// Session-backed storage
// =============================================================================

/// Snapshot of selected session keys, usable as synchronous [`Storage`].
///
/// Session access is async, cart operations are not. A request loads the
/// keys it needs up front, runs its cart operation against the snapshot, and
/// then [`flush`](Self::flush)es whatever changed back to the session.
#[derive(Debug, Clone, Default)]
pub struct SessionStorage {
    entries: HashMap<String, String>,
    dirty: BTreeSet<String>,
}

impl SessionStorage {
    /// Read `keys` from the session.
    ///
    /// A key that cannot be read is treated as absent.
    pub async fn load(session: &Session, keys: &[&str]) -> Self {
        let mut entries = HashMap::with_capacity(keys.len());

        for key in keys {
            match session.get::<String>(key).await {
                Ok(Some(value)) => {
                    entries.insert((*key).to_owned(), value);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(key = *key, error = %e, "Failed to read session slot; treating as empty");
                }
            }
        }

        Self {
            entries,
            dirty: BTreeSet::new(),
        }
    }

    /// Whether any key was written or removed since loading.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Write changed keys back to the session.
    ///
    /// Failures are logged and dropped; the caller has already responded to
    /// the user based on the snapshot.
    pub async fn flush(self, session: &Session) {
        for key in &self.dirty {
            let result = match self.entries.get(key) {
                Some(value) => session.insert(key, value).await,
                None => session.remove::<String>(key).await.map(|_| ()),
            };

            if let Err(e) = result {
                tracing::warn!(key = key.as_str(), error = %e, "Failed to write session slot");
            }
        }
    }
}

impl Storage for SessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        if value.len() > MAX_VALUE_BYTES {
            return Err(StorageError::QuotaExceeded {
                needed: value.len(),
                limit: MAX_VALUE_BYTES,
            });
        }
        self.entries.insert(key.to_owned(), value);
        self.dirty.insert(key.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) {
        self.entries.remove(key);
        self.dirty.insert(key.to_owned());
    }
}
