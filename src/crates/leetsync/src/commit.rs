//! Commit builder: one submission in, one commit on the branch out.

use crate::error::{Result, SyncError};
use crate::host::RepositoryHost;
use crate::language::extension_for;
use crate::marker::SyncMarker;
use crate::model::{EnrichedSubmission, RepositoryPointer};
use chrono::{DateTime, Utc};
use github::{Identity, NewCommit, Signature, TreeEntry};
use tracing::info;

/// Writes submissions as commits on the default branch.
pub struct CommitBuilder<'a, H: ?Sized> {
    host: &'a H,
    author: Identity,
    marker: String,
    destination_folder: Option<String>,
}

impl<'a, H: RepositoryHost + ?Sized> CommitBuilder<'a, H> {
    pub fn new(host: &'a H, author: Identity, marker: impl Into<String>) -> Self {
        Self {
            host,
            author,
            marker: marker.into(),
            destination_folder: None,
        }
    }

    /// Place problem directories under `folder` instead of the repository root.
    pub fn with_destination_folder(mut self, folder: Option<String>) -> Self {
        self.destination_folder = folder
            .map(|f| f.trim_matches('/').to_string())
            .filter(|f| !f.is_empty());
        self
    }

    /// Commit `submission` on top of `pointer` and move the branch to it.
    ///
    /// The language is resolved before any network call, so an unmapped
    /// language leaves the repository untouched.
    pub async fn commit(
        &self,
        pointer: RepositoryPointer,
        submission: &EnrichedSubmission,
    ) -> Result<RepositoryPointer> {
        let entries = self.tree_entries(submission)?;
        let date = commit_date(submission.timestamp)?;

        info!(
            submission_id = submission.id,
            title = %submission.title,
            lang = %submission.lang,
            "Committing solution"
        );

        let tree_sha = self.host.create_tree(&pointer.tree_sha, &entries).await?;

        let signature = Signature::new(&self.author, date);
        let commit = NewCommit {
            message: SyncMarker::for_submission(submission).message(&self.marker),
            tree: tree_sha.clone(),
            parents: vec![pointer.commit_sha.clone()],
            author: signature.clone(),
            committer: signature,
        };
        let commit_sha = self.host.create_commit(&commit).await?;

        self.host
            .update_ref(&pointer.default_branch, &commit_sha, true)
            .await?;

        info!(
            submission_id = submission.id,
            commit_sha = %commit_sha,
            "Committed solution"
        );

        Ok(pointer.advance(tree_sha, commit_sha))
    }

    /// Source file and README for the problem directory.
    pub fn tree_entries(&self, submission: &EnrichedSubmission) -> Result<Vec<TreeEntry>> {
        let extension = extension_for(&submission.lang)?;
        let dir = self.problem_dir(&submission.title);

        Ok(vec![
            TreeEntry::file(
                format!("{}/{}.{}", dir, submission.slug, extension),
                submission.code.clone(),
            ),
            TreeEntry::file(
                format!("{}/README.md", dir),
                submission.generated_readme.clone(),
            ),
        ])
    }

    fn problem_dir(&self, title: &str) -> String {
        let name = normalize_name(title);
        match &self.destination_folder {
            Some(folder) => format!("{}/{}", folder, name),
            None => name,
        }
    }
}

/// Directory-safe form of a problem title: lowercase, whitespace and path
/// separators replaced with underscores.
pub fn normalize_name(title: &str) -> String {
    title
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '/' || c == '\\' { '_' } else { c })
        .collect()
}

fn commit_date(timestamp: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| SyncError::Protocol(format!("timestamp {} is out of range", timestamp)))
}
