use clap::Subcommand;
use pbl_core::storage::Config;
use pbl_core::ConfigError;

use crate::context::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "log_level", "airtable.table_name")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values (API key masked)
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(ctx: &Context, action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => match ctx.config.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(ConfigError::UnknownKey(key).into()),
        },
        ConfigAction::Set { key, value } => {
            // Edit the file as written, not the env-overridden view.
            let mut config = Config::load_from(&ctx.config_path)?;
            config.set(&key, &value)?;
            config.save_to(&ctx.config_path)?;
            println!("ok");
        }
        ConfigAction::List => print_json(&ctx.config.redacted())?,
        ConfigAction::Reset => {
            Config::default().save_to(&ctx.config_path)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
