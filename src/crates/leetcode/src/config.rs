//! Connection settings for the LeetCode client.

use crate::error::{LeetCodeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default LeetCode origin.
pub const DEFAULT_BASE_URL: &str = "https://leetcode.com";

/// Configuration for the LeetCode GraphQL client.
#[derive(Clone, Serialize, Deserialize)]
pub struct LeetCodeConfig {
    /// Value of the `LEETCODE_SESSION` cookie.
    pub session: String,

    /// Value of the `csrftoken` cookie, also sent as `X-CSRFToken`.
    pub csrf_token: String,

    /// Site origin. The GraphQL endpoint is `{base_url}/graphql/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout duration.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl LeetCodeConfig {
    /// Create a new configuration from a session/CSRF token pair.
    pub fn new(session: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            csrf_token: csrf_token.into(),
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }

    /// Create configuration from environment variables.
    pub fn from_env(session_var: &str, csrf_var: &str) -> Result<Self> {
        let session = std::env::var(session_var).map_err(|_| {
            LeetCodeError::CredentialNotFound(format!("Environment variable: {}", session_var))
        })?;
        let csrf_token = std::env::var(csrf_var).map_err(|_| {
            LeetCodeError::CredentialNotFound(format!("Environment variable: {}", csrf_var))
        })?;

        Ok(Self::new(session, csrf_token))
    }

    /// Point the client at a different origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// GraphQL endpoint derived from the base URL.
    pub fn graphql_url(&self) -> String {
        format!("{}/graphql/", self.base_url.trim_end_matches('/'))
    }

    /// Cookie header carrying both tokens.
    pub(crate) fn cookie_header(&self) -> String {
        format!(
            "csrftoken={};LEETCODE_SESSION={};",
            self.csrf_token, self.session
        )
    }
}

// Tokens never reach log output.
impl fmt::Debug for LeetCodeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeetCodeConfig")
            .field("session", &"<redacted>")
            .field("csrf_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}
