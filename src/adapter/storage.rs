//! Storage operations (`storage.sync.get` / `storage.sync.set`).
//!
//! Emulates the chrome storage behavior on top of the host's flat
//! key-value settings store.

use serde_json::{Map, Value};

use crate::error::{BridgeError, BridgeResult};

use super::{Adapter, KeySpec};

impl Adapter {
    /// Look up settings per the normalized `keys` argument.
    ///
    /// Keys that are listed but not stored map to JSON `null` in the
    /// result (they are not filtered out); a defaults object fills them
    /// with its own value instead. Reads have no side effects.
    pub fn storage_get(&self, keys: &KeySpec) -> BridgeResult<Map<String, Value>> {
        let mut items = Map::new();

        match keys {
            KeySpec::Empty => {}
            KeySpec::All => {
                items = self.store.entries()?;
            }
            KeySpec::Single(key) => {
                items.insert(key.clone(), self.lookup(key)?);
            }
            KeySpec::List(list) => {
                for key in list {
                    items.insert(key.clone(), self.lookup(key)?);
                }
            }
            KeySpec::Defaults(defaults) => {
                if defaults.is_empty() {
                    log::warn!("The `keys` object does not contain any property of its own");
                }
                for (key, fallback) in defaults {
                    let value = match self.store.get(key)? {
                        Some(stored) => stored,
                        None => fallback.clone(),
                    };
                    items.insert(key.clone(), value);
                }
            }
        }

        Ok(items)
    }

    /// Merge the given key/value pairs into the settings store.
    ///
    /// Keys not present in `items` are left untouched. Returns the
    /// chrome-shaped integer status `0` on success.
    pub fn storage_set(&mut self, items: Option<&Value>) -> BridgeResult<i64> {
        let map = match items {
            Some(Value::Object(map)) => map,
            other => {
                log::warn!(
                    "The `keys` argument is not a valid object with key/value pairs: {:?}",
                    other
                );
                return Err(BridgeError::InvalidArgument(
                    "storage.sync.set expects an object of key/value pairs".to_string(),
                ));
            }
        };

        if map.is_empty() {
            // Degraded continuation: nothing to write, but not a failure.
            log::warn!("The `keys` object does not contain any property of its own");
        }

        for (key, value) in map {
            self.store.set(key, value.clone())?;
        }

        Ok(0)
    }

    fn lookup(&self, key: &str) -> BridgeResult<Value> {
        Ok(self.store.get(key)?.unwrap_or(Value::Null))
    }
}
