//! Configuration-specific error types.

use std::path::PathBuf;

/// Errors raised while locating, reading or writing `config.yml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No configuration file has been loaded")]
    NotLoaded,

    #[error("Could not locate a home directory for the default configuration")]
    NoHomeDirectory,

    #[error("Could not create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file exists but is not a valid configuration
    #[error("{path} is not a valid configuration: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Could not encode configuration: {0}")]
    Encode(String),

    #[error("API URL must start with http:// or https:// (got '{0}')")]
    InvalidApiUrl(String),
}
