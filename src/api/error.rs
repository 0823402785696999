//! API-specific error types.

/// Errors that can occur while talking to the items API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// API answered with a non-success status. The message is either the
    /// server's `detail` or a generic status-derived text.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// API rejected the credential. The session has already been cleared by
    /// the time this is returned.
    #[error("{message}")]
    Unauthorized { message: String },

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not the JSON we expected
    #[error("Failed to deserialize API response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Response had no body where one was required
    #[error("API response had no body")]
    EmptyBody,

    /// Login succeeded but handed back no usable token
    #[error("API response did not contain an access token")]
    MissingToken,
}

impl ApiError {
    /// Returns true if this failure already forced a logout.
    ///
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Returns the HTTP status the API answered with, if it answered.
    ///
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }
}
