//! File-backed settings store.
//!
//! Persists the host settings as a JSON file. Data is cached in memory and
//! written to disk on modification. On first load the `logs` collection is
//! created if absent, matching the lifetime contract of the host store.

use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::error::{BridgeError, BridgeResult};

use super::SettingsStore;

/// Key under which the host keeps its diagnostics log collection.
pub(crate) const LOGS_KEY: &str = "logs";

/// JSON-file-backed implementation of [`SettingsStore`].
pub struct FileSettingsStore {
    /// Path to the settings file.
    settings_path: PathBuf,
    /// In-memory cache of stored values.
    cache: Map<String, Value>,
    /// Whether the cache has uncommitted changes.
    dirty: bool,
}

impl FileSettingsStore {
    /// Open (or initialize) the settings store under `storage_dir`.
    ///
    /// If the settings file exists it is loaded into cache; if not, an
    /// empty cache is initialized. Either way the `logs` array is created
    /// when missing.
    pub fn new(storage_dir: PathBuf) -> Self {
        let settings_path = storage_dir.join("settings.json");

        let mut cache: Map<String, Value> = if settings_path.exists() {
            match fs::read_to_string(&settings_path) {
                Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
                Err(_) => Map::new(),
            }
        } else {
            Map::new()
        };

        let mut dirty = false;
        if !cache.contains_key(LOGS_KEY) {
            cache.insert(LOGS_KEY.to_string(), Value::Array(Vec::new()));
            dirty = true;
        }

        Self {
            settings_path,
            cache,
            dirty,
        }
    }

    /// Flush cached changes to disk.
    pub fn flush(&mut self) -> BridgeResult<()> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                BridgeError::Storage(format!(
                    "Failed to create storage directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let contents = serde_json::to_string_pretty(&self.cache)?;
        fs::write(&self.settings_path, contents).map_err(|e| {
            BridgeError::Storage(format!(
                "Failed to write settings file {}: {}",
                self.settings_path.display(),
                e
            ))
        })?;

        self.dirty = false;
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> BridgeResult<Option<Value>> {
        Ok(self.cache.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> BridgeResult<()> {
        self.cache.insert(key.to_string(), value);
        self.dirty = true;
        self.flush()
    }

    fn entries(&self) -> BridgeResult<Map<String, Value>> {
        Ok(self.cache.clone())
    }
}

impl Drop for FileSettingsStore {
    fn drop(&mut self) {
        // Best-effort flush on drop
        let _ = self.flush();
    }
}
