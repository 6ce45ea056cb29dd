pub mod catalog;
pub mod config;
pub mod gate;
pub mod onboard;
pub mod play;
pub mod profile;
pub mod settings;
pub mod stats;

use std::sync::Arc;

use vitaharmony_core::error::StorageError;
use vitaharmony_core::storage::{Database, SharedStore};

/// Open the on-disk record store.
pub fn open_store() -> Result<SharedStore, StorageError> {
    Ok(Arc::new(Database::open()?))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
