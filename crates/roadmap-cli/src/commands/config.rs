use std::path::PathBuf;

use clap::Subcommand;
use roadmap_core::SchedulerConfig;

use super::{config_path, CliResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "buffer_days", "weights.primary_specialty")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction, config: Option<PathBuf>) -> CliResult {
    let path = config_path(config)?;
    match action {
        ConfigAction::Get { key } => {
            let config = SchedulerConfig::load_or_default(&path);
            let value = config
                .get(&key)
                .ok_or_else(|| format!("unknown key: {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = SchedulerConfig::load_or_default(&path);
            config.set(&key, &value)?;
            config.save_to(&path)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = SchedulerConfig::load_or_default(&path);
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            SchedulerConfig::default().save_to(&path)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
