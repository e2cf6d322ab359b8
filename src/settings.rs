use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Name of the optional configuration file looked up in the working directory,
/// without extension so any format `config` understands can be used.
const DEFAULT_CONFIG_FILE: &str = "configuration";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: PathBuf,
    pub create_if_missing: bool,
    pub max_connections: u32,
}

/// Loads settings from defaults, then the configuration file, then `TRIVIA__*` env variables.
///
/// The file name can be overridden with `TRIVIA_CONFIG`.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let config_file =
        dotenv::var("TRIVIA_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_owned());
    load_from(&config_file)
}

pub fn load_from(config_file: &str) -> Result<Settings, ConfigError> {
    Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 8080)?
        .set_default("database.path", "trivia.db")?
        .set_default("database.create_if_missing", true)?
        .set_default("database.max_connections", 5)?
        .add_source(File::with_name(config_file).required(false))
        .add_source(
            Environment::with_prefix("TRIVIA")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
