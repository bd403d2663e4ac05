//! Tab query (`tabs.query`) and the declared send-message contract points.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};
use crate::host::BrowserWindow;

use super::keys::is_truthy;
use super::Adapter;

/// Recognized `tabs.query` filters.
///
/// `current_window` follows JS truthiness; `active` only triggers on a
/// strict boolean `true`, matching the chrome contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuerySpec {
    pub active: bool,
    pub current_window: bool,
}

impl QuerySpec {
    /// Parse the raw `query` field of a request.
    ///
    /// Returns `None` when the field is absent or not an object — a
    /// malformed query, reported by the caller as a diagnostic.
    pub fn from_request(query: Option<&Value>) -> Option<QuerySpec> {
        let map = match query {
            Some(Value::Object(map)) => map,
            _ => return None,
        };

        Some(QuerySpec {
            active: matches!(map.get("active"), Some(Value::Bool(true))),
            current_window: map.get("currentWindow").is_some_and(is_truthy),
        })
    }
}

/// Normalized tab representation returned to callers.
///
/// Deliberately minimal: the identifier is the only attribute the bridge
/// guarantees; everything else about a host tab may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRecord {
    pub id: i64,
}

impl Adapter {
    /// Query tabs per the given filter.
    ///
    /// A query that is not a well-formed object raises a diagnostic and
    /// returns an empty list rather than failing.
    pub fn tabs_query(&self, query: Option<&Value>) -> BridgeResult<Vec<TabRecord>> {
        let spec = match QuerySpec::from_request(query) {
            Some(spec) => spec,
            None => {
                log::warn!("No valid query is specified: {:?}", query);
                return Ok(Vec::new());
            }
        };

        let windows = if spec.current_window {
            vec![self.resolve_current_window()?]
        } else {
            self.windows.windows()
        };

        let records = if spec.active {
            windows
                .iter()
                .filter_map(|w| w.active_tab())
                .map(|t| TabRecord { id: t.id() })
                .collect()
        } else {
            windows
                .iter()
                .flat_map(|w| w.tabs())
                .map(|t| TabRecord { id: t.id() })
                .collect()
        };

        Ok(records)
    }

    /// Best-effort stand-in for the "currently executing" window.
    ///
    /// The host platform has no such concept, so this resolves to the
    /// active window if one is tracked, else the last-focused window. If
    /// an action page runs without focus, the result is approximate — the
    /// heuristic lives here, behind a name, so it stays visible and
    /// swappable per host.
    fn resolve_current_window(&self) -> BridgeResult<Arc<dyn BrowserWindow>> {
        self.windows
            .active_window()
            .or_else(|| self.windows.last_focused_window())
            .ok_or(BridgeError::NoCurrentWindow)
    }

    /// Declared but unimplemented: `tabs.sendMessage`.
    pub fn tabs_send_message(&self, _tab_id: i64, _message: &Value) -> BridgeResult<Value> {
        Err(BridgeError::NotImplemented("tabs.sendMessage"))
    }

    /// Declared but unimplemented: `runtime.sendMessage`.
    pub fn runtime_send_message(&self, _message: Option<&Value>) -> BridgeResult<Value> {
        Err(BridgeError::NotImplemented("runtime.sendMessage"))
    }
}
