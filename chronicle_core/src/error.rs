// Typed errors with thiserror. Surface meaningful messages to JS.
// Only MissingSelection reaches the user as a prompt; everything else is handled or logged where it is detected.

use thiserror::Error;

/// Engine error types.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChronicleError {
    #[error("Select a location first")]
    MissingSelection,

    #[error("No map marker named '{0}'")]
    UnknownMarker(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Content unavailable: {0}")]
    Content(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ChronicleError {
    fn from(err: serde_json::Error) -> Self {
        ChronicleError::Serialization(err.to_string())
    }
}
