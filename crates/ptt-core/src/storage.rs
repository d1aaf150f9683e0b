use std::{collections::HashMap, sync::RwLock};

use crate::CoreError;

/// Fixed storage key under which the whole ledger document is persisted.
pub const STORAGE_KEY: &str = "payment_trackers_v3";

/// Key-value slot the ledger document is written to. No transactional,
/// versioned or multi-key semantics are required of implementations.
pub trait StateStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
}

impl<T: StateStorage + ?Sized> StateStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set(key, value)
    }
}

impl<T: StateStorage + ?Sized> StateStorage for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set(key, value)
    }
}

/// Process-local storage, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
    writes: RwLock<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a slot, e.g. with a document written by an older session.
    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        let storage = Self::default();
        if let Ok(mut slots) = storage.slots.write() {
            slots.insert(key.to_string(), value.into());
        }
        storage
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|count| *count).unwrap_or(0)
    }
}

impl StateStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let slots = self
            .slots
            .read()
            .map_err(|_| CoreError::Storage("memory storage lock poisoned".into()))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| CoreError::Storage("memory storage lock poisoned".into()))?;
        slots.insert(key.to_string(), value.to_string());
        if let Ok(mut writes) = self.writes.write() {
            *writes += 1;
        }
        Ok(())
    }
}
