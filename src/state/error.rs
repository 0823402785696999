//! State management-specific error types.

/// Errors that can occur during state operations. Validation failures are
/// shown to the user verbatim, so their messages read as sentences.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Required form field left blank
    #[error("{0} is required.")]
    MissingField(&'static str),

    /// Email does not look like an address
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// Password confirmation differs from the password
    #[error("Passwords do not match.")]
    PasswordMismatch,

    /// Password below the minimum length
    #[error("Password must be at least {min} characters.")]
    PasswordTooShort { min: usize },

    /// Invalid view transition
    #[error("Invalid view transition: {0}")]
    InvalidViewTransition(String),
}
