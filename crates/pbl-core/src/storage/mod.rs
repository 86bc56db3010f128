mod config;
pub mod datastore;

pub use config::{AirtableConfig, Config, ENV_API_KEY, ENV_BASE_ID, ENV_TABLE_NAME};
pub use datastore::{JsonStore, UpsertSummary};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/pbl-dashboard[-dev]/` based on PBL_ENV.
///
/// Set PBL_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PBL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pbl-dashboard-dev")
    } else {
        base_dir.join("pbl-dashboard")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
