//! Event dispatch: the request/response pipeline.
//!
//! The dispatcher listens for named events from the host, parses the JSON
//! payload, routes by event name to an adapter operation, and sends back a
//! normalized `{name, response}` envelope through the event's responder
//! handle. Handling is fully synchronous: each event runs to completion
//! before the next is processed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapter::{Adapter, KeySpec};
use crate::config::Config;
use crate::error::{BridgeError, BridgeResult};
use crate::host::Responder;

/// Channel names the dispatcher routes.
const STORAGE_GET: &str = "storage.sync.get";
const STORAGE_SET: &str = "storage.sync.set";
const RUNTIME_SEND_MESSAGE: &str = "runtime.sendMessage";
const TABS_QUERY: &str = "tabs.query";

/// An inbound named event from the host dispatch mechanism.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    /// Channel name identifying the requested operation.
    pub name: String,
    /// Serialized JSON request payload.
    pub message: String,
}

/// Parsed request payload.
///
/// `keys: null` and a missing `keys` field mean different things to the
/// storage API (entire store vs. nothing), so JSON `null` must survive
/// parsing instead of collapsing into `None`.
#[derive(Debug, Default, Deserialize)]
struct RequestPayload {
    #[serde(default, deserialize_with = "present")]
    keys: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    query: Option<Value>,
}

/// Deserialize a field that is present, keeping JSON `null` as
/// `Some(Value::Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Normalized response envelope sent back to the caller.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// `"ok"` on success, `"error"` on failure.
    pub name: String,
    /// The operation result, or the error message text.
    pub response: Value,
}

impl ResponseEnvelope {
    fn from_result(result: BridgeResult<Value>) -> Self {
        match result {
            Ok(response) => Self {
                name: "ok".to_string(),
                response,
            },
            Err(e) => Self {
                name: "error".to_string(),
                response: Value::String(e.to_string()),
            },
        }
    }
}

/// Routes inbound events to adapter operations and responds with the
/// normalized envelope. Stateless between events.
pub struct Dispatcher {
    adapter: Adapter,
    response_prefix: String,
}

impl Dispatcher {
    /// Create a dispatcher with the default response channel prefix
    /// (`chrome`).
    pub fn new(adapter: Adapter) -> Self {
        Self {
            adapter,
            response_prefix: "chrome".to_string(),
        }
    }

    /// Create a dispatcher using the configured response prefix.
    pub fn with_config(adapter: Adapter, config: &Config) -> Self {
        Self {
            adapter,
            response_prefix: config.dispatch.response_prefix.clone(),
        }
    }

    /// Handle one inbound event to completion.
    ///
    /// A malformed payload is fatal to the whole handler: the error
    /// propagates and no response is sent. Unrecognized channel names are
    /// logged and ignored, preserving forward compatibility with channels
    /// this bridge does not handle.
    pub fn handle_event(
        &mut self,
        event: &InboundEvent,
        responder: &mut dyn Responder,
    ) -> BridgeResult<()> {
        let payload: RequestPayload = serde_json::from_str(&event.message)?;

        match event.name.as_str() {
            STORAGE_GET => {
                let spec = KeySpec::from_request(payload.keys.as_ref());
                let result = self.adapter.storage_get(&spec).map(Value::Object);
                self.respond_back(responder, STORAGE_GET, result);
            }
            STORAGE_SET => {
                let result = self
                    .adapter
                    .storage_set(payload.keys.as_ref())
                    .map(Value::from);
                self.respond_back(responder, STORAGE_SET, result);
            }
            RUNTIME_SEND_MESSAGE => {
                let result = self.adapter.runtime_send_message(None);
                self.respond_back(responder, RUNTIME_SEND_MESSAGE, result);
            }
            TABS_QUERY => {
                let result = self
                    .adapter
                    .tabs_query(payload.query.as_ref())
                    .and_then(|tabs| serde_json::to_value(tabs).map_err(BridgeError::from));
                self.respond_back(responder, TABS_QUERY, result);
            }
            other => {
                log::debug!("Ignoring event on unrecognized channel '{}'", other);
            }
        }

        Ok(())
    }

    /// Serialize the envelope and send it back on the mirrored channel
    /// (e.g. `chrome.storage.sync.get`).
    fn respond_back(
        &self,
        responder: &mut dyn Responder,
        name: &str,
        result: BridgeResult<Value>,
    ) {
        let envelope = ResponseEnvelope::from_result(result);
        let channel = format!("{}.{}", self.response_prefix, name);

        match serde_json::to_string(&envelope) {
            Ok(json) => responder.dispatch_message(&channel, &json),
            Err(e) => log::error!("Failed to serialize response envelope: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{FixtureWindow, FixtureWindows, MemorySettingsStore, SettingsStore};
    use serde_json::json;

    /// Responder that records everything dispatched through it.
    #[derive(Default)]
    struct RecordingResponder {
        sent: Vec<(String, String)>,
    }

    impl Responder for RecordingResponder {
        fn dispatch_message(&mut self, channel: &str, payload: &str) {
            self.sent.push((channel.to_string(), payload.to_string()));
        }
    }

    /// Store whose every access fails, to exercise the error envelope.
    struct BrokenStore;

    impl SettingsStore for BrokenStore {
        fn get(&self, _key: &str) -> BridgeResult<Option<Value>> {
            Err(BridgeError::Storage("settings unavailable".to_string()))
        }

        fn set(&mut self, _key: &str, _value: Value) -> BridgeResult<()> {
            Err(BridgeError::Storage("settings unavailable".to_string()))
        }

        fn entries(&self) -> BridgeResult<serde_json::Map<String, Value>> {
            Err(BridgeError::Storage("settings unavailable".to_string()))
        }
    }

    fn dispatcher() -> Dispatcher {
        let windows = FixtureWindows::new(vec![
            FixtureWindow::new(&[1, 2], Some(1)),
            FixtureWindow::new(&[3], Some(0)),
        ])
        .with_active(0);
        let adapter = Adapter::new(Box::new(MemorySettingsStore::new()), Box::new(windows));
        Dispatcher::new(adapter)
    }

    fn event(name: &str, message: Value) -> InboundEvent {
        InboundEvent {
            name: name.to_string(),
            message: message.to_string(),
        }
    }

    fn only_envelope(responder: &RecordingResponder) -> (String, ResponseEnvelope) {
        assert_eq!(responder.sent.len(), 1);
        let (channel, payload) = &responder.sent[0];
        (channel.clone(), serde_json::from_str(payload).unwrap())
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let mut dispatcher = dispatcher();
        let mut responder = RecordingResponder::default();

        dispatcher
            .handle_event(
                &event("storage.sync.set", json!({"keys": {"a": 5}})),
                &mut responder,
            )
            .unwrap();

        let (channel, envelope) = only_envelope(&responder);
        assert_eq!(channel, "chrome.storage.sync.set");
        assert_eq!(envelope.name, "ok");
        assert_eq!(envelope.response, json!(0));

        let mut responder = RecordingResponder::default();
        dispatcher
            .handle_event(
                &event("storage.sync.get", json!({"keys": "a"})),
                &mut responder,
            )
            .unwrap();

        let (channel, envelope) = only_envelope(&responder);
        assert_eq!(channel, "chrome.storage.sync.get");
        assert_eq!(envelope.name, "ok");
        assert_eq!(envelope.response, json!({"a": 5}));
    }

    #[test]
    fn test_get_with_defaults_object() {
        let mut dispatcher = dispatcher();
        let mut responder = RecordingResponder::default();

        dispatcher
            .handle_event(
                &event("storage.sync.get", json!({"keys": {"missing": "fallback"}})),
                &mut responder,
            )
            .unwrap();

        let (_, envelope) = only_envelope(&responder);
        assert_eq!(envelope.name, "ok");
        assert_eq!(envelope.response, json!({"missing": "fallback"}));
    }

    #[test]
    fn test_tabs_query_envelope() {
        let mut dispatcher = dispatcher();
        let mut responder = RecordingResponder::default();

        dispatcher
            .handle_event(
                &event(
                    "tabs.query",
                    json!({"query": {"currentWindow": true, "active": true}}),
                ),
                &mut responder,
            )
            .unwrap();

        let (channel, envelope) = only_envelope(&responder);
        assert_eq!(channel, "chrome.tabs.query");
        assert_eq!(envelope.name, "ok");
        assert_eq!(envelope.response, json!([{"id": 2}]));
    }

    #[test]
    fn test_invalid_set_produces_error_envelope() {
        let mut dispatcher = dispatcher();
        let mut responder = RecordingResponder::default();

        dispatcher
            .handle_event(
                &event("storage.sync.set", json!({"keys": [1, 2]})),
                &mut responder,
            )
            .unwrap();

        let (_, envelope) = only_envelope(&responder);
        assert_eq!(envelope.name, "error");
        assert!(envelope.response.is_string());
    }

    #[test]
    fn test_storage_failure_produces_error_envelope() {
        let windows = FixtureWindows::default();
        let adapter = Adapter::new(Box::new(BrokenStore), Box::new(windows));
        let mut dispatcher = Dispatcher::new(adapter);
        let mut responder = RecordingResponder::default();

        dispatcher
            .handle_event(
                &event("storage.sync.get", json!({"keys": null})),
                &mut responder,
            )
            .unwrap();

        let (_, envelope) = only_envelope(&responder);
        assert_eq!(envelope.name, "error");
        assert_eq!(
            envelope.response,
            json!("Storage error: settings unavailable")
        );
    }

    #[test]
    fn test_runtime_send_message_is_not_implemented() {
        let mut dispatcher = dispatcher();
        let mut responder = RecordingResponder::default();

        dispatcher
            .handle_event(&event("runtime.sendMessage", json!({})), &mut responder)
            .unwrap();

        let (channel, envelope) = only_envelope(&responder);
        assert_eq!(channel, "chrome.runtime.sendMessage");
        assert_eq!(envelope.name, "error");
        assert_eq!(
            envelope.response,
            json!("'runtime.sendMessage' is not implemented")
        );
    }

    #[test]
    fn test_unrecognized_channel_gets_no_response() {
        let mut dispatcher = dispatcher();
        let mut responder = RecordingResponder::default();

        dispatcher
            .handle_event(&event("bookmarks.getTree", json!({})), &mut responder)
            .unwrap();

        assert!(responder.sent.is_empty());
    }

    #[test]
    fn test_malformed_payload_aborts_without_response() {
        let mut dispatcher = dispatcher();
        let mut responder = RecordingResponder::default();

        let bad = InboundEvent {
            name: "storage.sync.get".to_string(),
            message: "{not json".to_string(),
        };
        let err = dispatcher.handle_event(&bad, &mut responder).unwrap_err();
        assert!(matches!(err, BridgeError::Json(_)));
        assert!(responder.sent.is_empty());
    }

    #[test]
    fn test_dispatch_cycles_are_independent() {
        let mut dispatcher = dispatcher();

        // A failing cycle...
        let mut responder = RecordingResponder::default();
        dispatcher
            .handle_event(
                &event("storage.sync.set", json!({"keys": "bogus"})),
                &mut responder,
            )
            .unwrap();
        assert_eq!(only_envelope(&responder).1.name, "error");

        // ...leaves nothing behind that taints the next one.
        let mut responder = RecordingResponder::default();
        dispatcher
            .handle_event(
                &event("storage.sync.get", json!({"keys": null})),
                &mut responder,
            )
            .unwrap();
        let (_, envelope) = only_envelope(&responder);
        assert_eq!(envelope.name, "ok");
        assert_eq!(envelope.response, json!({}));
    }

    #[test]
    fn test_configured_response_prefix() {
        let mut config = Config::default();
        config.dispatch.response_prefix = "browser".to_string();

        let adapter = Adapter::new(
            Box::new(MemorySettingsStore::new()),
            Box::new(FixtureWindows::default()),
        );
        let mut dispatcher = Dispatcher::with_config(adapter, &config);
        let mut responder = RecordingResponder::default();

        dispatcher
            .handle_event(&event("tabs.query", json!({"query": {}})), &mut responder)
            .unwrap();

        let (channel, _) = only_envelope(&responder);
        assert_eq!(channel, "browser.tabs.query");
    }

    #[test]
    fn test_missing_payload_fields_default_to_absent() {
        let mut dispatcher = dispatcher();
        let mut responder = RecordingResponder::default();

        // No `keys` field at all: chrome's get(undefined) → empty mapping
        dispatcher
            .handle_event(&event("storage.sync.get", json!({})), &mut responder)
            .unwrap();

        let (_, envelope) = only_envelope(&responder);
        assert_eq!(envelope.name, "ok");
        assert_eq!(envelope.response, json!({}));
    }
}
