//! Per-invocation state shared by every command.

use chrono::{DateTime, Utc};
use pbl_core::model::datetime;
use pbl_core::storage::Config;
use pbl_core::{CoreError, JsonStore, Snapshot, Student};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub struct Context {
    /// Effective configuration (file plus environment overrides)
    pub config: Config,
    pub config_path: PathBuf,
    pub data_dir: PathBuf,
    /// Reference time for every score computed in this run
    pub now: DateTime<Utc>,
}

impl Context {
    /// Resolve config, data directory and reference time from the global flags.
    pub fn load(
        data_dir: Option<PathBuf>,
        config_path: Option<PathBuf>,
        now: Option<&str>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let (mut config, config_path) = match config_path {
            Some(path) => (Config::load_from(&path)?, path),
            None => (Config::load()?, Config::default_path()?),
        };
        config.apply_env_overrides();

        let data_dir = match data_dir {
            Some(dir) => dir,
            None => config.resolved_data_dir()?,
        };

        let now = match now {
            Some(raw) => datetime::parse(raw).ok_or_else(|| format!("invalid --now value: {raw}"))?,
            None => Utc::now(),
        };

        Ok(Self {
            config,
            config_path,
            data_dir,
            now,
        })
    }

    pub fn store(&self) -> Result<JsonStore, CoreError> {
        Ok(JsonStore::open(&self.data_dir)?)
    }

    pub fn snapshot(&self) -> Result<Snapshot, CoreError> {
        Ok(self.store()?.snapshot()?)
    }
}

/// Look up a student or fail with a not-found error.
pub fn require_student<'a>(snapshot: &'a Snapshot, student_id: &str) -> Result<&'a Student, CoreError> {
    snapshot.student(student_id).ok_or_else(|| CoreError::NotFound {
        kind: "student",
        id: student_id.to_string(),
    })
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Logs go to stderr so stdout stays pure JSON.
///
/// `RUST_LOG` wins over the configured level.
pub fn init_tracing(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
