//! Values that flow through a sync run.

use crate::marker::SyncMarker;
use crate::readme;
use github::Identity;
use leetcode::{QuestionDetail, SubmissionDetail, SubmissionSummary};
use serde::Serialize;

/// Where the previous run left off, recovered from commit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checkpoint {
    /// Epoch seconds of the newest synced submission, 0 if none.
    pub resume_timestamp: i64,

    /// Author and committer identity for new commits.
    pub author: Identity,

    /// SHA of the commit the checkpoint was read from.
    pub marker_commit: Option<String>,

    /// Metadata of that commit, when its message parses.
    pub last_synced: Option<SyncMarker>,
}

impl Checkpoint {
    /// True when no earlier sync commit was found.
    pub fn is_initial(&self) -> bool {
        self.marker_commit.is_none()
    }
}

/// Listing entry kept for syncing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRef {
    pub id: u64,
    pub title: String,
    pub title_slug: String,
    pub lang: String,
    pub timestamp: i64,
}

impl From<&SubmissionSummary> for SubmissionRef {
    fn from(summary: &SubmissionSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title.clone(),
            title_slug: summary.title_slug.clone(),
            lang: summary.lang.clone(),
            timestamp: summary.timestamp,
        }
    }
}

/// A submission merged with its question metadata, ready to commit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedSubmission {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub question_id: String,
    pub lang: String,
    pub timestamp: i64,
    pub code: String,
    pub question_body: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    pub runtime_display: String,
    pub memory_display: String,
    pub generated_readme: String,
}

impl EnrichedSubmission {
    /// Merge listing, detail and question responses and render the README.
    ///
    /// The timestamp comes from the listing entry so the commit date matches
    /// the value later runs compare against.
    pub fn assemble(
        submission: &SubmissionRef,
        detail: SubmissionDetail,
        question: QuestionDetail,
    ) -> Self {
        let mut enriched = Self {
            id: submission.id,
            slug: submission.title_slug.clone(),
            title: question.title,
            question_id: question.question_id,
            lang: detail.lang,
            timestamp: submission.timestamp,
            code: detail.code,
            question_body: question.content,
            difficulty: question.difficulty,
            tags: question.tags,
            runtime_display: detail.runtime_display,
            memory_display: detail.memory_display,
            generated_readme: String::new(),
        };
        enriched.generated_readme = readme::render(&enriched);
        enriched
    }
}

/// Branch head threaded through the commit chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryPointer {
    pub default_branch: String,
    pub tree_sha: String,
    pub commit_sha: String,
}

impl RepositoryPointer {
    /// Pointer to a newly created commit on the same branch.
    pub fn advance(self, tree_sha: String, commit_sha: String) -> Self {
        Self {
            default_branch: self.default_branch,
            tree_sha,
            commit_sha,
        }
    }
}
