//! Error types for the LeetCode client.

use thiserror::Error;

/// Result type for LeetCode operations.
pub type Result<T> = std::result::Result<T, LeetCodeError>;

/// Errors that can occur when talking to LeetCode.
#[derive(Debug, Error)]
pub enum LeetCodeError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to serialize/deserialize data.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Session or CSRF token rejected.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Credential not found in environment.
    #[error("Credential not found: {0}")]
    CredentialNotFound(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Non-success HTTP status.
    #[error("LeetCode API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// The GraphQL endpoint answered with an `errors` array.
    #[error("GraphQL error: {0}")]
    GraphQlError(String),

    /// The requested submission or question does not exist or is not visible
    /// to the authenticated session.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid response payload.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl LeetCodeError {
    /// Check if this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            LeetCodeError::HttpError(_) | LeetCodeError::RateLimitExceeded(_) => true,
            LeetCodeError::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Check if this error is due to authentication.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            LeetCodeError::AuthenticationError(_) | LeetCodeError::CredentialNotFound(_)
        )
    }
}

impl From<serde_json::Error> for LeetCodeError {
    fn from(err: serde_json::Error) -> Self {
        LeetCodeError::SerializationError(err.to_string())
    }
}
