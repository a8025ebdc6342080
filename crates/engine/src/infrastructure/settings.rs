//! Engine settings.
//!
//! Layered, lowest precedence first:
//! 1. Built-in defaults
//! 2. Optional JSON file at `CHARSHEET_CONFIG_PATH` (default `config/engine.json`)
//! 3. `CHARSHEET_*` environment variables (e.g. `CHARSHEET_PORT=9000`)

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

/// Environment variable naming the optional JSON settings file.
pub const CONFIG_PATH_ENV: &str = "CHARSHEET_CONFIG_PATH";

pub const DEFAULT_CONFIG_PATH: &str = "config/engine.json";

const ENV_PREFIX: &str = "CHARSHEET";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid bind address {0}")]
    Address(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Returned by the health endpoint.
    pub welcome_message: String,
    /// Browser origin allowed by CORS.
    pub allowed_origin: String,
    /// JSON item catalog. The built-in catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// JSON seed character. The built-in character is used when unset.
    #[serde(default)]
    pub character_path: Option<PathBuf>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            welcome_message: "Character sheet authority ready".to_string(),
            allowed_origin: "http://localhost:5173".to_string(),
            catalog_path: None,
            character_path: None,
        }
    }
}

impl EngineSettings {
    /// Load from the file named by `CHARSHEET_CONFIG_PATH` plus the environment.
    pub fn load() -> Result<Self, SettingsError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::load_from(&path, config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn load_from(path: &str, env: config::Environment) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("welcome_message", defaults.welcome_message)?
            .set_default("allowed_origin", defaults.allowed_origin)?
            .add_source(config::File::new(path, config::FileFormat::Json).required(false))
            .add_source(env)
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| SettingsError::Address(raw))
    }
}
