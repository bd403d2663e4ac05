//! Host platform abstraction layer.
//!
//! This module defines the traits the bridge needs the host browser to
//! present: a flat key-value settings store, window/tab enumeration, and a
//! responder handle for sending messages back to the page that raised an
//! event. The adapter only ever borrows these resources; it never closes
//! or invalidates them.

mod memory;
mod store;

pub use memory::{FixtureTab, FixtureWindow, FixtureWindows, MemorySettingsStore};
pub use store::FileSettingsStore;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::BridgeResult;

/// Flat key-value settings store persisted by the host.
///
/// Values are arbitrary JSON; keys are plain strings with no ordering
/// semantics. Reads and writes are fallible because the backing store is a
/// borrowed host resource that can break underneath us.
pub trait SettingsStore {
    /// Look up a single key. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> BridgeResult<Option<Value>>;

    /// Write a single key, overwriting any previous value.
    fn set(&mut self, key: &str, value: Value) -> BridgeResult<()>;

    /// Snapshot of the entire store contents.
    fn entries(&self) -> BridgeResult<Map<String, Value>>;
}

/// A tab handle borrowed from the host.
pub trait BrowserTab {
    /// Stable identifier for the tab. The only attribute the bridge
    /// guarantees to callers.
    fn id(&self) -> i64;
}

/// A window handle borrowed from the host.
pub trait BrowserWindow {
    /// All tabs of this window, in the host's enumeration order.
    fn tabs(&self) -> Vec<Arc<dyn BrowserTab>>;

    /// The window's one designated active tab, if any.
    fn active_tab(&self) -> Option<Arc<dyn BrowserTab>>;
}

/// Window enumeration presented by the host.
///
/// The host has no notion of a "currently executing" window, so the bridge
/// approximates it from the active and last-focused windows (see
/// [`crate::adapter::tabs`]).
pub trait WindowAccess {
    /// All open windows, in the host's enumeration order.
    fn windows(&self) -> Vec<Arc<dyn BrowserWindow>>;

    /// The window the host currently tracks as active, if any.
    fn active_window(&self) -> Option<Arc<dyn BrowserWindow>>;

    /// The window that most recently held focus, if any.
    fn last_focused_window(&self) -> Option<Arc<dyn BrowserWindow>>;
}

/// Responder handle attached to an inbound event.
///
/// Mirrors the host's page-addressed message dispatch: the response is sent
/// on a named channel as serialized JSON text.
pub trait Responder {
    fn dispatch_message(&mut self, channel: &str, payload: &str);
}
