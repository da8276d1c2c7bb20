//! Checkpoint recovery from commit history.
//!
//! Sync commits are dated with the submission's own timestamp, so the newest
//! sync commit's committer date is exactly the newest synced submission.

use crate::error::{Result, SyncError};
use crate::marker::{is_sync_commit, SyncMarker};
use crate::model::{Checkpoint, RepositoryPointer};
use github::CommitSummary;
use tracing::{debug, info};

/// Scan `commits` (newest first) for the most recent sync commit.
///
/// Without one, the resume timestamp is 0 and the author of the oldest
/// fetched commit is reused, keeping attribution with the human who created
/// the repository rather than whatever identity runs the sync.
pub fn resolve_checkpoint(commits: &[CommitSummary], marker: &str) -> Result<Checkpoint> {
    let oldest = commits.last().ok_or_else(|| {
        SyncError::Config(
            "repository has no commits; push an initial commit before syncing".to_string(),
        )
    })?;

    if let Some(commit) = commits.iter().find(|c| is_sync_commit(marker, &c.message)) {
        let checkpoint = Checkpoint {
            resume_timestamp: commit.committer.date.timestamp(),
            author: commit.author.identity(),
            marker_commit: Some(commit.sha.clone()),
            last_synced: SyncMarker::parse(marker, &commit.message),
        };
        info!(
            commit_sha = %commit.sha,
            resume_timestamp = checkpoint.resume_timestamp,
            "Found previous sync commit"
        );
        return Ok(checkpoint);
    }

    debug!(
        scanned = commits.len(),
        author = %oldest.author.name,
        "No sync commit found, starting from the beginning"
    );
    Ok(Checkpoint {
        resume_timestamp: 0,
        author: oldest.author.identity(),
        marker_commit: None,
        last_synced: None,
    })
}

/// Branch head the first new commit builds on.
pub fn head_pointer(commits: &[CommitSummary], default_branch: &str) -> Result<RepositoryPointer> {
    let head = commits.first().ok_or_else(|| {
        SyncError::Config(
            "repository has no commits; push an initial commit before syncing".to_string(),
        )
    })?;

    Ok(RepositoryPointer {
        default_branch: default_branch.to_string(),
        tree_sha: head.tree_sha.clone(),
        commit_sha: head.sha.clone(),
    })
}
