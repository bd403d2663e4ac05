//! Error types for the bridge.
//!
//! Every adapter operation returns a [`BridgeResult`] instead of stashing
//! failures in shared state. The dispatcher is the only place an error is
//! turned into caller-visible text (the `"error"` response envelope).

use thiserror::Error;

/// Errors that can occur while bridging a request.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A request argument had a shape the operation cannot work with
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The host settings store failed to read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// `currentWindow` was requested but the host tracks no active or
    /// last-focused window
    #[error("No current window could be resolved")]
    NoCurrentWindow,

    /// Declared contract point with no behavior yet
    #[error("'{0}' is not implemented")]
    NotImplemented(&'static str),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed JSON in a message payload or the settings file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
