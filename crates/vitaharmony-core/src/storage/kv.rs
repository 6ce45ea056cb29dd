//! Key-value persistence.
//!
//! Every persisted record is stored as one independently serialized JSON
//! value under a fixed key. Reads never fail loudly: a missing or corrupt
//! value is replaced by the type's default. Writes are best-effort.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// Storage keys for persisted records.
pub mod keys {
    pub const HAS_COMPLETED_ONBOARDING: &str = "hasCompletedOnboarding";
    pub const USER_PROFILE: &str = "userProfile";
    pub const WORKOUT_HISTORY: &str = "workoutHistory";
    pub const MEDITATION_HISTORY: &str = "meditationHistory";
    pub const LAST_WORKOUT_DATE: &str = "lastWorkoutDate";
    pub const SETTINGS: &str = "settings";

    /// Every key the app writes. Used when wiping account data.
    pub const ALL: [&str; 6] = [
        HAS_COMPLETED_ONBOARDING,
        USER_PROFILE,
        WORKOUT_HISTORY,
        MEDITATION_HISTORY,
        LAST_WORKOUT_DATE,
        SETTINGS,
    ];
}

/// String key-value store.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Store handle shared between the profile store, history and drivers.
pub type SharedStore = Arc<dyn KvStore>;

/// Load a JSON record, returning `None` if absent or unreadable.
pub fn load<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read record");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding corrupt record");
            None
        }
    }
}

/// Load a JSON record, substituting the default if absent or unreadable.
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KvStore, key: &str) -> T {
    load(store, key).unwrap_or_default()
}

/// Serialize and write a record.
pub fn save<T: Serialize + ?Sized>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), crate::error::CoreError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)?;
    Ok(())
}

/// Fire-and-forget variant of [`save`]; failures are logged and dropped.
pub fn save_best_effort<T: Serialize + ?Sized>(store: &dyn KvStore, key: &str, value: &T) {
    if let Err(e) = save(store, key, value) {
        tracing::warn!(key, error = %e, "failed to persist record");
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }

    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}
