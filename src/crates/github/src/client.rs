//! GitHub REST client covering the calls needed to append commits to a branch
//! without a local checkout.

use crate::config::GitHubConfig;
use crate::error::{GitHubError, Result};
use crate::types::{
    CommitSummary, NewCommit, NewTree, RefUpdate, Repository, TreeEntry, WireCommitListing,
    WireSha,
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

const API_VERSION: &str = "2022-11-28";

/// Largest page the commit listing returns.
pub const MAX_PER_PAGE: u32 = 100;

/// GitHub REST API client bound to a single repository.
#[derive(Clone)]
pub struct GitHubClient {
    config: GitHubConfig,
    client: Client,
}

impl GitHubClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    /// Active configuration.
    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    /// Most recent commits on the default branch, newest first.
    ///
    /// GET /repos/{owner}/{repo}/commits
    pub async fn list_commits(&self, per_page: u32) -> Result<Vec<CommitSummary>> {
        let url = format!("{}/commits", self.config.repo_url());
        let request = self
            .request(Method::GET, &url)
            .query(&[("per_page", per_page.min(MAX_PER_PAGE))]);

        let commits: Vec<WireCommitListing> = self.send(request).await?;
        Ok(commits.into_iter().map(CommitSummary::from).collect())
    }

    /// GET /repos/{owner}/{repo}
    pub async fn get_repository(&self) -> Result<Repository> {
        let url = self.config.repo_url();
        self.send(self.request(Method::GET, &url)).await
    }

    /// Create a tree layered on `base_tree`, returning its SHA.
    ///
    /// POST /repos/{owner}/{repo}/git/trees
    pub async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> Result<String> {
        let url = format!("{}/git/trees", self.config.repo_url());
        let body = NewTree {
            base_tree,
            tree: entries,
        };

        let tree: WireSha = self.send(self.request(Method::POST, &url).json(&body)).await?;
        debug!(tree_sha = %tree.sha, entries = entries.len(), "Created tree");
        Ok(tree.sha)
    }

    /// Create a commit object, returning its SHA.
    ///
    /// POST /repos/{owner}/{repo}/git/commits
    pub async fn create_commit(&self, commit: &NewCommit) -> Result<String> {
        let url = format!("{}/git/commits", self.config.repo_url());

        let created: WireSha = self.send(self.request(Method::POST, &url).json(commit)).await?;
        debug!(commit_sha = %created.sha, "Created commit");
        Ok(created.sha)
    }

    /// Point `heads/{branch}` at `sha`.
    ///
    /// PATCH /repos/{owner}/{repo}/git/refs/heads/{branch}
    pub async fn update_ref(&self, branch: &str, sha: &str, force: bool) -> Result<()> {
        let url = format!("{}/git/refs/heads/{}", self.config.repo_url(), branch);
        let body = RefUpdate { sha, force };

        let _: serde_json::Value = self.send(self.request(Method::PATCH, &url).json(&body)).await?;
        debug!(branch = %branch, sha = %sha, "Updated ref");
        Ok(())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("accept", "application/vnd.github+json")
            .header("x-github-api-version", API_VERSION)
            .bearer_auth(&self.config.token)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| GitHubError::InvalidResponse(e.to_string()))
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok());
    let rate_limited = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(|s| s == "0")
        .unwrap_or(false);

    let message = response.text().await.unwrap_or_default();

    Err(classify_status(status, retry_after, rate_limited, message))
}

fn classify_status(
    status: StatusCode,
    retry_after: Option<u64>,
    rate_limited: bool,
    message: String,
) -> GitHubError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => GitHubError::RateLimitExceeded {
            retry_after_secs: retry_after.unwrap_or(60),
        },
        StatusCode::FORBIDDEN if rate_limited || retry_after.is_some() => {
            GitHubError::RateLimitExceeded {
                retry_after_secs: retry_after.unwrap_or(60),
            }
        }
        StatusCode::UNAUTHORIZED => GitHubError::AuthenticationError(
            "GitHub API authentication failed - check the token".to_string(),
        ),
        StatusCode::NOT_FOUND => GitHubError::NotFound(message),
        _ => GitHubError::ApiError {
            status: status.as_u16(),
            message,
        },
    }
}
