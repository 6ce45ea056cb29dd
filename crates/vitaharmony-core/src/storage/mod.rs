mod config;
pub mod database;
pub mod history;
pub mod kv;

pub use config::{Config, GateConfig, SessionConfig};
pub use database::Database;
pub use history::HistoryStore;
pub use kv::{keys, KvStore, MemoryStore, SharedStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/vitaharmony[-dev]/` based on VITAHARMONY_ENV.
///
/// Set VITAHARMONY_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("VITAHARMONY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("vitaharmony-dev")
    } else {
        base_dir.join("vitaharmony")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
