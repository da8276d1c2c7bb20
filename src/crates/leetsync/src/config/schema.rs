//! Configuration schema for leetsync

use crate::error::{Result, SyncError};
use crate::marker::DEFAULT_MARKER;
use crate::retry::RetryPolicy;
use crate::sync::SyncOptions;
use github::GitHubConfig;
use leetcode::LeetCodeConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SyncConfig {
    /// Target repository
    #[serde(default)]
    pub github: GitHubSettings,

    /// Submission source
    #[serde(default)]
    pub leetcode: LeetCodeSettings,

    /// Sync behaviour
    #[serde(default)]
    pub sync: SyncSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GitHub settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubSettings {
    /// Token with write access to the repository (supports `${VAR}`)
    pub token: Option<String>,

    /// Target repository as `owner/name`
    pub repository: Option<String>,

    /// REST API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Commits inspected when looking for the last sync commit
    #[serde(default = "default_history_depth")]
    pub history_depth: u32,
}

fn default_api_base() -> String {
    github::config::DEFAULT_API_BASE.to_string()
}

fn default_history_depth() -> u32 {
    100
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            token: None,
            repository: None,
            api_base: default_api_base(),
            history_depth: default_history_depth(),
        }
    }
}

/// LeetCode settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeetCodeSettings {
    /// `LEETCODE_SESSION` cookie (supports `${VAR}`)
    pub session: Option<String>,

    /// `csrftoken` cookie (supports `${VAR}`)
    pub csrf_token: Option<String>,

    /// Site origin
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Submissions per listing page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Pause between listing pages in milliseconds
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
}

fn default_base_url() -> String {
    leetcode::config::DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    20
}

fn default_page_delay_ms() -> u64 {
    1000
}

impl Default for LeetCodeSettings {
    fn default() -> Self {
        Self {
            session: None,
            csrf_token: None,
            base_url: default_base_url(),
            page_size: default_page_size(),
            page_delay_ms: default_page_delay_ms(),
        }
    }
}

/// Sync settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Retries for source calls after the first listing page
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Exponential backoff base in seconds
    #[serde(default = "default_retry_base")]
    pub retry_base_secs: f64,

    /// Optional folder for problem directories
    #[serde(default)]
    pub destination_folder: Option<String>,

    /// Window for skipping older accepted duplicates, 0 disables
    #[serde(default = "default_filter_duplicate_secs")]
    pub filter_duplicate_secs: i64,

    /// Commit message prefix marking sync commits
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

fn default_max_retries() -> usize {
    5
}

fn default_retry_base() -> f64 {
    3.0
}

fn default_filter_duplicate_secs() -> i64 {
    0
}

fn default_commit_message() -> String {
    DEFAULT_MARKER.to_string()
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_base_secs: default_retry_base(),
            destination_folder: None,
            filter_duplicate_secs: default_filter_duplicate_secs(),
            commit_message: default_commit_message(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Hosted-automation inputs, read from `INPUT_<NAME>` variables.
const ACTION_INPUTS: &[&str] = &[
    "GITHUB-TOKEN",
    "LEETCODE-SESSION",
    "LEETCODE-CSRF-TOKEN",
    "DESTINATION-FOLDER",
    "FILTER-DUPLICATE-SECS",
];

impl SyncConfig {
    /// Resolve environment variables in credential fields
    ///
    /// Supports ${VAR_NAME} syntax
    pub fn resolve_env_vars(&mut self) {
        for field in [
            &mut self.github.token,
            &mut self.github.repository,
            &mut self.leetcode.session,
            &mut self.leetcode.csrf_token,
        ] {
            if let Some(value) = field.take() {
                *field = Some(Self::expand_env_var(&value));
            }
        }
    }

    fn expand_env_var(value: &str) -> String {
        if value.starts_with("${") && value.ends_with('}') {
            let var_name = &value[2..value.len() - 1];
            std::env::var(var_name).unwrap_or_else(|_| value.to_string())
        } else {
            value.to_string()
        }
    }

    /// Apply hosted-automation inputs (`INPUT_GITHUB-TOKEN`, ...) and the
    /// `GITHUB_REPOSITORY` variable the runner provides.
    ///
    /// `lookup` is normally `std::env::var(..).ok()`; empty values are ignored.
    pub fn apply_action_inputs<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        for input in ACTION_INPUTS {
            let Some(value) = get(&format!("INPUT_{}", input)) else {
                continue;
            };
            match *input {
                "GITHUB-TOKEN" => self.github.token = Some(value),
                "LEETCODE-SESSION" => self.leetcode.session = Some(value),
                "LEETCODE-CSRF-TOKEN" => self.leetcode.csrf_token = Some(value),
                "DESTINATION-FOLDER" => self.sync.destination_folder = Some(value),
                "FILTER-DUPLICATE-SECS" => {
                    self.sync.filter_duplicate_secs = value.trim().parse().map_err(|_| {
                        SyncError::Config(format!(
                            "filter-duplicate-secs must be an integer, got '{}'",
                            value
                        ))
                    })?;
                }
                _ => {}
            }
        }

        if self.github.repository.is_none() {
            self.github.repository = get("GITHUB_REPOSITORY");
        }
        Ok(())
    }

    /// Check that every credential is present before any network call.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if blank(&self.github.token) {
            missing.push("github.token");
        }
        if blank(&self.github.repository) {
            missing.push("github.repository");
        }
        if blank(&self.leetcode.session) {
            missing.push("leetcode.session");
        }
        if blank(&self.leetcode.csrf_token) {
            missing.push("leetcode.csrf_token");
        }
        if !missing.is_empty() {
            return Err(SyncError::Config(format!(
                "missing required settings: {}",
                missing.join(", ")
            )));
        }

        if let Some(repository) = &self.github.repository {
            github::parse_slug(repository).map_err(|e| SyncError::Config(e.to_string()))?;
        }
        if self.github.history_depth == 0 || self.github.history_depth > github::MAX_PER_PAGE {
            return Err(SyncError::Config(format!(
                "github.history_depth must be between 1 and {}, got {}",
                github::MAX_PER_PAGE,
                self.github.history_depth
            )));
        }
        if self.leetcode.page_size == 0 {
            return Err(SyncError::Config("leetcode.page_size must be positive".to_string()));
        }
        if self.sync.commit_message.trim().is_empty() {
            return Err(SyncError::Config("sync.commit_message must not be empty".to_string()));
        }
        Ok(())
    }

    /// Client configuration for the target repository.
    pub fn github_config(&self) -> Result<GitHubConfig> {
        let (token, repository) = match (&self.github.token, &self.github.repository) {
            (Some(token), Some(repository)) => (token, repository),
            _ => {
                return Err(SyncError::Config(
                    "github.token and github.repository are required".to_string(),
                ))
            }
        };

        let config = GitHubConfig::from_slug(token.clone(), repository)
            .map_err(|e| SyncError::Config(e.to_string()))?;
        Ok(config.with_api_base(self.github.api_base.clone()))
    }

    /// Client configuration for LeetCode.
    pub fn leetcode_config(&self) -> Result<LeetCodeConfig> {
        match (&self.leetcode.session, &self.leetcode.csrf_token) {
            (Some(session), Some(csrf)) => Ok(LeetCodeConfig::new(session.clone(), csrf.clone())
                .with_base_url(self.leetcode.base_url.clone())),
            _ => Err(SyncError::Config(
                "leetcode.session and leetcode.csrf_token are required".to_string(),
            )),
        }
    }

    /// Engine tunables.
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            page_size: self.leetcode.page_size,
            page_delay: Duration::from_millis(self.leetcode.page_delay_ms),
            history_depth: self.github.history_depth,
            retry: RetryPolicy {
                multiplier: self.sync.retry_base_secs,
                ..RetryPolicy::default()
            }
            .with_max_retries(self.sync.max_retries),
            marker: self.sync.commit_message.clone(),
            destination_folder: self.sync.destination_folder.clone(),
            filter_duplicate_secs: self.sync.filter_duplicate_secs,
        }
    }
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).map_or(true, str::is_empty)
}
