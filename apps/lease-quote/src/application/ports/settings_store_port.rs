//! Settings Store Port (Driven Port)
//!
//! Key-value string storage for persisted calculator settings.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

/// Errors from a settings store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writing would exceed the store's capacity.
    #[error("Settings store quota exceeded writing '{key}'")]
    QuotaExceeded {
        /// Key being written.
        key: String,
    },

    /// Store backend I/O failed.
    #[error("Settings store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Store contents could not be decoded.
    #[error("Settings store is corrupt: {0}")]
    Corrupt(String),
}

/// Port for settings persistence.
pub trait SettingsStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_many(&[(key, value)])
    }

    /// Store every `(key, value)` pair, or none of them.
    fn set_many(&self, batch: &[(&str, &str)]) -> Result<(), StoreError>;
}

/// In-memory implementation for testing.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl InMemorySettingsStore {
    /// Create a new in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once stored values exceed `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RwLock::default(),
            quota_bytes: Some(bytes),
        }
    }

    /// Seed a raw value, bypassing the quota (for test setup).
    pub fn insert(&self, key: &str, value: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, batch: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(quota) = self.quota_bytes {
            let mut staged = entries.clone();
            for (key, value) in batch {
                staged.insert((*key).to_string(), (*value).to_string());
                let used: usize = staged.iter().map(|(k, v)| k.len() + v.len()).sum();
                if used > quota {
                    return Err(StoreError::QuotaExceeded {
                        key: (*key).to_string(),
                    });
                }
            }
        }
        for (key, value) in batch {
            entries.insert((*key).to_string(), (*value).to_string());
        }
        drop(entries);
        Ok(())
    }
}
