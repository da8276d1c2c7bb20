//! Repository host seam.

use async_trait::async_trait;
use github::{CommitSummary, GitHubClient, NewCommit, Repository, TreeEntry};

/// Git data operations on the target repository.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Most recent commits on the default branch, newest first.
    async fn list_commits(&self, per_page: u32) -> github::Result<Vec<CommitSummary>>;

    /// Repository metadata, for the default branch name.
    async fn get_repository(&self) -> github::Result<Repository>;

    /// New tree on top of `base_tree`; entries replace existing paths.
    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> github::Result<String>;

    /// New commit object.
    async fn create_commit(&self, commit: &NewCommit) -> github::Result<String>;

    /// Move `heads/{branch}` to `sha`.
    async fn update_ref(&self, branch: &str, sha: &str, force: bool) -> github::Result<()>;
}

#[async_trait]
impl RepositoryHost for GitHubClient {
    async fn list_commits(&self, per_page: u32) -> github::Result<Vec<CommitSummary>> {
        GitHubClient::list_commits(self, per_page).await
    }

    async fn get_repository(&self) -> github::Result<Repository> {
        GitHubClient::get_repository(self).await
    }

    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> github::Result<String> {
        GitHubClient::create_tree(self, base_tree, entries).await
    }

    async fn create_commit(&self, commit: &NewCommit) -> github::Result<String> {
        GitHubClient::create_commit(self, commit).await
    }

    async fn update_ref(&self, branch: &str, sha: &str, force: bool) -> github::Result<()> {
        GitHubClient::update_ref(self, branch, sha, force).await
    }
}
