//! Core error types for vitaharmony-core.
//!
//! Most failures in this crate are recovered silently (corrupt records fall
//! back to defaults, gate failures fall back to the native app), so these
//! types mostly surface from explicit operations such as opening the store,
//! editing the profile or saving the config.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for vitaharmony-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Remote gate errors
    #[error("Gate error: {0}")]
    Gate(#[from] GateError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The session driver task is gone
    #[error("Session driver stopped")]
    DriverStopped,
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Store is locked")]
    Locked,

    /// The connection mutex was poisoned by a panicking writer
    #[error("Store connection poisoned")]
    Poisoned,

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Value outside of the accepted range
    #[error("{field} must be between {min} and {max} in steps of {step}, got {value}")]
    OutOfRange {
        field: String,
        value: u32,
        min: u32,
        max: u32,
        step: u32,
    },

    /// Required field left empty
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Operation not valid in the current step
    #[error("Invalid step: expected {expected}, currently at {actual}")]
    InvalidStep { expected: String, actual: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Remote gate errors. Never shown to the user: every variant maps to the
/// native app display mode.
#[derive(Error, Debug)]
pub enum GateError {
    /// Request could not be built or sent
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Configured URL does not parse
    #[error("Invalid gate URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _msg) => {
                if code.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
