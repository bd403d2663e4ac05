//! The translation layer.
//!
//! [`Adapter`] exposes the chrome-shaped operations (`storage.sync.get`,
//! `storage.sync.set`, `tabs.query`, and the declared send-message
//! contract points) on top of the host accessor traits. Operations never
//! panic and never throw across their public boundary: every failure
//! comes back as a [`crate::error::BridgeError`].

pub mod keys;
pub mod storage;
pub mod tabs;

pub use keys::KeySpec;
pub use tabs::{QuerySpec, TabRecord};

use crate::host::{SettingsStore, WindowAccess};

/// Translates chrome API requests into host platform operations.
pub struct Adapter {
    pub(crate) store: Box<dyn SettingsStore>,
    pub(crate) windows: Box<dyn WindowAccess>,
}

impl Adapter {
    /// Create an adapter over the given host accessors.
    pub fn new(store: Box<dyn SettingsStore>, windows: Box<dyn WindowAccess>) -> Self {
        Self { store, windows }
    }
}
