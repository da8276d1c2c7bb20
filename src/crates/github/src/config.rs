//! Connection settings for the GitHub client.

use crate::error::{GitHubError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Configuration for the GitHub client.
#[derive(Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Token with `contents: write` on the target repository.
    pub token: String,

    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// REST API base URL, overridable for GitHub Enterprise.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Request timeout duration.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    /// `User-Agent` header; GitHub rejects requests without one.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl GitHubConfig {
    /// Create a new configuration.
    pub fn new(token: impl Into<String>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            api_base: default_api_base(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }

    /// Create a configuration from an `owner/name` slug.
    pub fn from_slug(token: impl Into<String>, slug: &str) -> Result<Self> {
        let (owner, repo) = parse_slug(slug)?;
        Ok(Self::new(token, owner, repo))
    }

    /// Set the REST API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// `{api_base}/repos/{owner}/{repo}`
    pub fn repo_url(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Split `owner/name` into its parts.
pub fn parse_slug(slug: &str) -> Result<(String, String)> {
    match slug.trim().split_once('/') {
        Some((owner, repo))
            if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
        {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(GitHubError::ConfigError(format!(
            "repository must be in owner/name form, got '{}'",
            slug
        ))),
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("leetsync/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = GitHubConfig::new("ghp_token", "octocat", "leetcode")
            .with_api_base("https://ghe.example.com/api/v3/")
            .with_timeout(Duration::from_secs(10));

        assert_eq!(
            config.repo_url(),
            "https://ghe.example.com/api/v3/repos/octocat/leetcode"
        );
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("leetsync/"));
    }

    #[test]
    fn test_parse_slug() {
        assert_eq!(
            parse_slug("octocat/leetcode").unwrap(),
            ("octocat".to_string(), "leetcode".to_string())
        );
        assert!(parse_slug("octocat").is_err());
        assert!(parse_slug("/leetcode").is_err());
        assert!(parse_slug("a/b/c").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = GitHubConfig::new("ghp_secret", "octocat", "leetcode");
        assert!(!format!("{:?}", config).contains("ghp_secret"));
    }
}
