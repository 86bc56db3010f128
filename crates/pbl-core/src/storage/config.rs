//! TOML-based application configuration.
//!
//! Stores:
//! - Log level
//! - Data directory override
//! - Airtable credentials and table name
//!
//! Configuration is stored at `~/.config/pbl-dashboard/config.toml`. It is
//! loaded once at process start; environment overrides are applied at the
//! same moment and the resulting value is passed down by reference.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;

/// Airtable connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirtableConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub base_id: String,
    #[serde(default = "default_table_name")]
    pub table_name: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pbl-dashboard/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Where students.json / tasks.json / teams.json live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub airtable: AirtableConfig,
}

// Default functions
fn default_table_name() -> String {
    "Students".into()
}
fn default_api_url() -> String {
    "https://api.airtable.com".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_id: String::new(),
            table_name: default_table_name(),
            api_url: default_api_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            data_dir: None,
            airtable: AirtableConfig::default(),
        }
    }
}

impl AirtableConfig {
    /// Whether credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.base_id.trim().is_empty()
    }
}

/// Environment variables consulted by [`Config::apply_env_overrides`].
pub const ENV_API_KEY: &str = "AIRTABLE_API_KEY";
pub const ENV_BASE_ID: &str = "AIRTABLE_BASE_ID";
pub const ENV_TABLE_NAME: &str = "AIRTABLE_TABLE_NAME";

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                // Every settable leaf is a string.
                if !obj.get(part).ok_or_else(unknown)?.is_string() {
                    return Err(invalid("not a single value; use a dotted key".into()));
                }
                obj.insert(part.to_string(), serde_json::Value::String(value.into()));
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Apply overrides from a variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(v) = non_empty(ENV_API_KEY) {
            self.airtable.api_key = v;
        }
        if let Some(v) = non_empty(ENV_BASE_ID) {
            self.airtable.base_id = v;
        }
        if let Some(v) = non_empty(ENV_TABLE_NAME) {
            self.airtable.table_name = v;
        }
    }

    /// Apply `AIRTABLE_*` environment overrides. Call once at startup.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Data directory: explicit override or the default location.
    pub fn resolved_data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => data_dir(),
        }
    }

    /// Get a config value as string by dot-separated key.
    ///
    /// An unset `data_dir` reads as an empty string (the default location
    /// is used).
    pub fn get(&self, key: &str) -> Option<String> {
        if key == "data_dir" && self.data_dir.is_none() {
            return Some(String::new());
        }
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        // Absent from the serialized form until first set.
        if key == "data_dir" {
            self.data_dir = Some(PathBuf::from(value));
            return Ok(());
        }
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Copy with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.airtable.api_key.is_empty() {
            copy.airtable.api_key = "********".into();
        }
        copy
    }
}
