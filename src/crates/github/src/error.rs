//! Error types for the GitHub client.

use thiserror::Error;

/// Result type for GitHub operations.
pub type Result<T> = std::result::Result<T, GitHubError>;

/// Errors that can occur when calling the GitHub REST API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Token missing or rejected.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Primary or secondary rate limit hit.
    #[error("Rate limit exceeded (retry after {retry_after_secs}s)")]
    RateLimitExceeded { retry_after_secs: u64 },

    /// Repository, branch or object does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("GitHub API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Invalid response payload.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl GitHubError {
    /// Check if this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            GitHubError::HttpError(_) | GitHubError::RateLimitExceeded { .. } => true,
            GitHubError::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Check if this error is due to authentication.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, GitHubError::AuthenticationError(_))
    }
}

impl From<serde_json::Error> for GitHubError {
    fn from(err: serde_json::Error) -> Self {
        GitHubError::InvalidResponse(err.to_string())
    }
}
