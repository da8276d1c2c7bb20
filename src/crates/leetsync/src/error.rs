//! Error types for the sync engine.
//!
//! Errors fall into four groups: configuration problems caught before any
//! network call, upstream failures from either platform (already retried where
//! the policy allows), mapping failures that no retry can fix, and aborted runs
//! that had already committed part of their work.

use github::GitHubError;
use leetcode::LeetCodeError;
use thiserror::Error;

/// Result type alias for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Main error type for sync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Missing credentials, malformed repository slug, unusable repository.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Submission source failure.
    #[error("LeetCode error: {0}")]
    Source(#[from] LeetCodeError),

    /// Repository host failure.
    #[error("GitHub error: {0}")]
    Host(#[from] GitHubError),

    /// The submission language has no file extension mapping.
    #[error("Language {lang} does not have a registered extension")]
    UnsupportedLanguage { lang: String },

    /// Upstream data that does not fit the expected shape.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A run that failed after committing at least one submission. The branch
    /// points at `head`, and the next run resumes from there.
    #[error("Sync aborted after {committed} commit(s), branch head {head}: {source}")]
    Aborted {
        committed: usize,
        head: String,
        #[source]
        source: Box<SyncError>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file parse error
    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SyncError {
    /// Errors that describe the data itself; retrying the same input fails the
    /// same way.
    pub fn is_mapping_error(&self) -> bool {
        match self {
            SyncError::UnsupportedLanguage { .. } | SyncError::Protocol(_) => true,
            SyncError::Aborted { source, .. } => source.is_mapping_error(),
            _ => false,
        }
    }

    /// Check if this error is due to rejected or missing credentials.
    pub fn is_auth_error(&self) -> bool {
        match self {
            SyncError::Source(e) => e.is_auth_error(),
            SyncError::Host(e) => e.is_auth_error(),
            SyncError::Aborted { source, .. } => source.is_auth_error(),
            _ => false,
        }
    }

    /// Number of submissions committed before the failure.
    pub fn committed(&self) -> usize {
        match self {
            SyncError::Aborted { committed, .. } => *committed,
            _ => 0,
        }
    }
}
