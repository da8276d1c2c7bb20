//! Minimal GitHub REST client for the git data API.
//!
//! Creates trees and commits directly through the API so that commits can be
//! appended to a branch with arbitrary author/committer dates and without a
//! local clone.
//!
//! ```rust,ignore
//! use github::{GitHubClient, GitHubConfig};
//!
//! let client = GitHubClient::new(GitHubConfig::from_slug(token, "octocat/leetcode")?)?;
//! let head = &client.list_commits(1).await?[0];
//! println!("{} {}", head.sha, head.message);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{GitHubClient, MAX_PER_PAGE};
pub use config::{parse_slug, GitHubConfig};
pub use error::{GitHubError, Result};
pub use types::{CommitSummary, Identity, NewCommit, Repository, Signature, TreeEntry};
