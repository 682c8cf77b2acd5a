//! Application configuration
//!
//! Loaded from a TOML file in the data directory; a default config is
//! written on first run so users have something to edit.

use crate::constants::{API_KEY_ENV_VAR, QUOTE_API_BASE_URL, QUOTE_API_TIMEOUT_MS};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Quote API base URL
    pub base_url: String,
    /// API key; may be left empty and supplied via environment instead
    #[serde(default)]
    pub key: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub log_level: String,
    /// Run the expired-entry sweep on startup
    pub clean_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: QUOTE_API_BASE_URL.to_string(),
                key: String::new(),
                timeout_ms: QUOTE_API_TIMEOUT_MS,
            },
            general: GeneralConfig {
                log_level: "info".to_string(),
                clean_on_start: true,
            },
        }
    }
}

impl Config {
    /// Load config from `path`, writing defaults there on first run
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save(path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Save config as pretty TOML
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).expect("config serializes");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: path.display().to_string(),
                source: e,
            })?;
        }
        fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Resolve the API key from config or environment
    pub fn api_key(&self) -> Result<String, ConfigError> {
        if !self.api.key.is_empty() {
            return Ok(self.api.key.clone());
        }
        std::env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(API_KEY_ENV_VAR.to_string()))
    }
}
