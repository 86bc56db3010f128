//! Core error types for pbl-core.
//!
//! The scoring engine itself never fails; these errors belong to the
//! layers that feed it (configuration, the JSON datastore and Airtable sync).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pbl-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Datastore-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Airtable sync errors
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Lookup of a record that does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
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

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Could not determine the data directory
    #[error("Cannot determine data directory: {0}")]
    DataDir(String),
}

/// Datastore-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A data file exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file is not valid JSON for its record type
    #[error("Malformed data in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be encoded for writing
    #[error("Failed to encode records for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Airtable sync errors.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Airtable answered with a non-success status
    #[error("Airtable API error (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    /// Client could not be built from the supplied configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Merging fetched records into the local store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
