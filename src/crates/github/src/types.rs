//! Request and response types for the git data API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File mode for a regular, non-executable blob.
pub const MODE_FILE: &str = "100644";

/// Name and email of a commit author or committer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Identity plus the timestamp recorded in the commit object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub date: DateTime<Utc>,
}

impl Signature {
    pub fn new(identity: &Identity, date: DateTime<Utc>) -> Self {
        Self {
            name: identity.name.clone(),
            email: identity.email.clone(),
            date,
        }
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.name.clone(), self.email.clone())
    }
}

/// A commit as returned by `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitSummary {
    pub sha: String,
    pub message: String,
    pub author: Signature,
    pub committer: Signature,
    pub tree_sha: String,
}

/// Repository metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub default_branch: String,
}

/// A file to place in a new tree. Paths that already exist in the base tree
/// are replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    pub path: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl TreeEntry {
    /// Regular file with inline content.
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: MODE_FILE.to_string(),
            kind: "blob".to_string(),
            content: content.into(),
        }
    }
}

/// Body of `POST /repos/{owner}/{repo}/git/commits`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCommit {
    pub message: String,
    pub tree: String,
    pub parents: Vec<String>,
    pub author: Signature,
    pub committer: Signature,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct WireCommitListing {
    pub sha: String,
    pub commit: WireCommit,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCommit {
    pub message: String,
    pub author: Signature,
    pub committer: Signature,
    pub tree: WireSha,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireSha {
    pub sha: String,
}

impl From<WireCommitListing> for CommitSummary {
    fn from(wire: WireCommitListing) -> Self {
        Self {
            sha: wire.sha,
            message: wire.commit.message,
            author: wire.commit.author,
            committer: wire.commit.committer,
            tree_sha: wire.commit.tree.sha,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewTree<'a> {
    pub base_tree: &'a str,
    pub tree: &'a [TreeEntry],
}

#[derive(Debug, Serialize)]
pub(crate) struct RefUpdate<'a> {
    pub sha: &'a str,
    pub force: bool,
}
