//! In-memory host implementations.
//!
//! Used by tests and by embedders that drive the bridge without a real
//! host behind it: a plain in-memory settings store and scriptable
//! window/tab fixtures.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::BridgeResult;

use super::{BrowserTab, BrowserWindow, SettingsStore, WindowAccess};

/// In-memory [`SettingsStore`] with no persistence.
#[derive(Default)]
pub struct MemorySettingsStore {
    entries: Map<String, Value>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated from `(key, value)` pairs.
    pub fn with_entries(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> BridgeResult<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> BridgeResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn entries(&self) -> BridgeResult<Map<String, Value>> {
        Ok(self.entries.clone())
    }
}

/// A scriptable tab handle.
#[derive(Debug, Clone, Copy)]
pub struct FixtureTab {
    pub id: i64,
}

impl BrowserTab for FixtureTab {
    fn id(&self) -> i64 {
        self.id
    }
}

/// A scriptable window handle holding a list of tabs and the index of its
/// active tab.
pub struct FixtureWindow {
    tabs: Vec<Arc<dyn BrowserTab>>,
    active: Option<usize>,
}

impl FixtureWindow {
    /// Build a window from tab ids; `active` indexes into `tab_ids`.
    pub fn new(tab_ids: &[i64], active: Option<usize>) -> Arc<Self> {
        let tabs = tab_ids
            .iter()
            .map(|&id| Arc::new(FixtureTab { id }) as Arc<dyn BrowserTab>)
            .collect();
        Arc::new(Self { tabs, active })
    }
}

impl BrowserWindow for FixtureWindow {
    fn tabs(&self) -> Vec<Arc<dyn BrowserTab>> {
        self.tabs.clone()
    }

    fn active_tab(&self) -> Option<Arc<dyn BrowserTab>> {
        self.active.and_then(|i| self.tabs.get(i).cloned())
    }
}

/// Scriptable [`WindowAccess`] implementation.
///
/// `active` and `last_focused` index into `windows`; either may be unset to
/// exercise the current-window fallback chain.
#[derive(Default)]
pub struct FixtureWindows {
    windows: Vec<Arc<FixtureWindow>>,
    active: Option<usize>,
    last_focused: Option<usize>,
}

impl FixtureWindows {
    pub fn new(windows: Vec<Arc<FixtureWindow>>) -> Self {
        Self {
            windows,
            active: None,
            last_focused: None,
        }
    }

    pub fn with_active(mut self, index: usize) -> Self {
        self.active = Some(index);
        self
    }

    pub fn with_last_focused(mut self, index: usize) -> Self {
        self.last_focused = Some(index);
        self
    }
}

impl WindowAccess for FixtureWindows {
    fn windows(&self) -> Vec<Arc<dyn BrowserWindow>> {
        self.windows
            .iter()
            .map(|w| w.clone() as Arc<dyn BrowserWindow>)
            .collect()
    }

    fn active_window(&self) -> Option<Arc<dyn BrowserWindow>> {
        self.active
            .and_then(|i| self.windows.get(i).cloned())
            .map(|w| w as Arc<dyn BrowserWindow>)
    }

    fn last_focused_window(&self) -> Option<Arc<dyn BrowserWindow>> {
        self.last_focused
            .and_then(|i| self.windows.get(i).cloned())
            .map(|w| w as Arc<dyn BrowserWindow>)
    }
}
