//! # configs
//!
//! Runtime settings for rusty-blog.
//!
//! Sources, later ones win:
//! 1. built-in defaults
//! 2. `rusty-blog.toml` in the working directory, if present
//! 3. `RUSTY_BLOG__*` environment variables (`.env` is read first)

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_DATABASE: &str = "instance/rusty-blog.json";
const CONFIG_FILE: &str = "rusty-blog";
const ENV_PREFIX: &str = "RUSTY_BLOG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogSettings {
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Path of the JSON document holding `users` and `posts`.
    pub database: PathBuf,
    #[serde(default)]
    pub log: LogSettings,
}

impl Settings {
    /// Loads settings from defaults, the optional config file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_config(
            Config::builder()
                .add_source(File::with_name(CONFIG_FILE).required(false))
                .add_source(Environment::with_prefix(ENV_PREFIX).separator("__")),
        )
    }

    pub fn with_database(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            log: LogSettings::default(),
        }
    }

    fn from_config(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings = builder
            .set_default("database", DEFAULT_DATABASE)?
            .set_default("log.format", "pretty")?
            .set_default("log.filter", "info")?
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
