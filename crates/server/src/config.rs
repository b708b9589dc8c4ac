use std::{
    fs,
    path::{Path, PathBuf},
};

use manni::{client, repository};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Where recorded visits are persisted.
    #[serde(default = "default_visits_path")]
    pub visits_path: PathBuf,
    /// Region shown for stops the service reports without one.
    #[serde(default = "default_region")]
    pub default_region: String,
    #[serde(default)]
    pub client: client::Config,
    #[serde(default)]
    pub suggestions: repository::Config,
}

const fn default_port() -> u16 {
    3000
}

fn default_visits_path() -> PathBuf {
    PathBuf::from("visits.json")
}

fn default_region() -> String {
    "Dresden".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            visits_path: default_visits_path(),
            default_region: default_region(),
            client: client::Config::default(),
            suggestions: repository::Config::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Client(#[from] client::Error),
}

impl ServerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.client.validate()?;
        Ok(config)
    }
}
