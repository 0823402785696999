//! Application-wide error types.
//!
//! Every module reports failures through its own enum; they meet here so
//! the network thread and the UI loop can propagate any of them with `?`.

pub use crate::api::ApiError;
pub use crate::config::ConfigError;
pub use crate::session::SessionError;
pub use crate::state::StateError;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    State(#[from] StateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Drawing to the terminal failed
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Logger error: {0}")]
    Logger(String),

    #[error("Failed to create runtime: {0}")]
    RuntimeCreation(String),
}

pub type AppResult<T> = Result<T, AppError>;
