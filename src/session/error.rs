//! Session persistence error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing the stored credential.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Refused to store an empty bearer token
    #[error("Refusing to store an empty access token")]
    EmptyToken,

    /// Failed to read the session file
    #[error("Failed to read session from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write or remove the session file
    #[error("Failed to write session to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize the session file
    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    /// Failed to deserialize the session file
    #[error("Failed to deserialize session: {0}")]
    DeserializationFailed(String),
}
