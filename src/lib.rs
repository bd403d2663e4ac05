//! extbridge - Chrome-flavoured extension API bridge.
//!
//! Makes a host browser's extension scripting surface behave like the
//! `chrome.*` API. Content and injected scripts send requests in the
//! chrome vocabulary (storage get/set, tab query, message send); the
//! bridge translates them into the operations the host actually provides
//! and answers with chrome-shaped responses, including chrome's
//! error-signaling convention.
//!
//! # Architecture
//!
//! The library is organized into these main modules:
//!
//! - [`config`] - Configuration loading and management
//! - [`host`] - Host platform abstraction (settings store, windows/tabs,
//!   responder handle) plus file-backed and in-memory implementations
//! - [`adapter`] - The translation layer: storage and tab operations over
//!   the host traits
//! - [`dispatch`] - Event routing and the `{name, response}` envelope
//!
//! # Example
//!
//! ```
//! use extbridge::adapter::Adapter;
//! use extbridge::dispatch::{Dispatcher, InboundEvent};
//! use extbridge::host::{FixtureWindows, MemorySettingsStore, Responder};
//!
//! struct PrintResponder;
//!
//! impl Responder for PrintResponder {
//!     fn dispatch_message(&mut self, channel: &str, payload: &str) {
//!         println!("{channel}: {payload}");
//!     }
//! }
//!
//! let adapter = Adapter::new(
//!     Box::new(MemorySettingsStore::new()),
//!     Box::new(FixtureWindows::default()),
//! );
//! let mut dispatcher = Dispatcher::new(adapter);
//!
//! let event = InboundEvent {
//!     name: "storage.sync.set".to_string(),
//!     message: r#"{"keys": {"volume": 11}}"#.to_string(),
//! };
//! dispatcher.handle_event(&event, &mut PrintResponder).unwrap();
//! ```

pub mod adapter;
pub mod config;
pub mod dispatch;
pub mod host;

mod error;

// Re-export commonly used types for convenience
pub use adapter::{Adapter, KeySpec, QuerySpec, TabRecord};
pub use config::Config;
pub use dispatch::{Dispatcher, InboundEvent, ResponseEnvelope};
pub use error::{BridgeError, BridgeResult};
