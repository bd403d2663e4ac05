//! Configuration loading and management.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::{BridgeError, BridgeResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub storage: StorageConfig,
    pub dispatch: DispatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the persisted settings file.
    pub directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Prefix prepended to response channel names
    /// (e.g. `chrome` → `chrome.storage.sync.get`).
    pub response_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_storage_dir().to_string_lossy().into_owned(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            response_prefix: "chrome".to_string(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("extbridge"))
        .unwrap_or_else(|| PathBuf::from("~/.extbridge"))
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("extbridge")
            .join("config.toml")
    }

    /// Load config from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_path();

        let mut config = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => config,
                    Err(e) => {
                        log::warn!("Failed to parse config: {}", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read config: {}", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.validate();
        config
    }

    /// Validate config values, falling back to defaults where empty
    fn validate(&mut self) {
        if self.dispatch.response_prefix.is_empty() {
            self.dispatch.response_prefix = DispatchConfig::default().response_prefix;
        }
        if self.storage.directory.is_empty() {
            self.storage.directory = StorageConfig::default().directory;
        }
    }

    /// Save config to file
    pub fn save(&self) -> BridgeResult<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| BridgeError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)?;

        Ok(())
    }
}
