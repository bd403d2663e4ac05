//! Key argument normalization for storage requests.
//!
//! The chrome storage API overloads its `keys` argument: a single key, an
//! array of keys, a defaults object, `null` for "everything", or nothing
//! at all. [`KeySpec`] resolves that overload once, at the request
//! boundary, so the storage operation can match on it exhaustively.

use serde_json::{Map, Value};

/// Normalized form of the `keys` argument to `storage.sync.get`.
#[derive(Debug, Clone, PartialEq)]
pub enum KeySpec {
    /// Argument was absent or falsy (but not `null`): nothing to return.
    Empty,
    /// Argument was literally `null`: return the entire store.
    All,
    /// A single key.
    Single(String),
    /// A list of keys, already coerced to strings.
    List(Vec<String>),
    /// A defaults object: key → fallback value. Also where empty arrays
    /// and truthy non-object scalars land, as a zero-property map.
    Defaults(Map<String, Value>),
}

impl KeySpec {
    /// Build a [`KeySpec`] from the raw JSON `keys` field of a request.
    ///
    /// `None` means the field was absent from the payload. Non-string
    /// array elements raise a diagnostic and are looked up under their
    /// JSON text form.
    pub fn from_request(keys: Option<&Value>) -> KeySpec {
        let keys = match keys {
            None => return KeySpec::Empty,
            Some(Value::Null) => return KeySpec::All,
            Some(v) if !is_truthy(v) => return KeySpec::Empty,
            Some(v) => v,
        };

        match keys {
            Value::String(s) => KeySpec::Single(s.clone()),
            Value::Array(items) if !items.is_empty() => {
                let list = items.iter().map(coerce_key).collect();
                KeySpec::List(list)
            }
            Value::Object(map) => KeySpec::Defaults(map.clone()),
            // Empty arrays and truthy scalars have no own properties; the
            // storage op reports that with a diagnostic and returns nothing.
            _ => KeySpec::Defaults(Map::new()),
        }
    }
}

/// Coerce one array element to a key string.
fn coerce_key(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => {
            log::warn!("An item of the `keys` array was not a string: {}", other);
            other.to_string()
        }
    }
}

/// JavaScript-style truthiness for JSON values.
///
/// `null`, `false`, `0` and `""` are falsy; everything else (including
/// empty arrays and objects) is truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
