//! Submission source seam.
//!
//! Listings must be ordered by strictly decreasing timestamp; the orchestrator
//! relies on that to stop paging early and checks it as it goes.

use async_trait::async_trait;
use leetcode::{
    LeetCodeClient, QuestionDetail, SubmissionCursor, SubmissionDetail, SubmissionPage,
};

/// Read access to a user's submission history.
#[async_trait]
pub trait SubmissionSource: Send + Sync {
    /// One page of submissions, newest first.
    async fn list_submissions(
        &self,
        cursor: &SubmissionCursor,
        limit: u32,
    ) -> leetcode::Result<SubmissionPage>;

    /// Code and runtime statistics of one submission.
    async fn submission_detail(&self, submission_id: u64) -> leetcode::Result<SubmissionDetail>;

    /// Question metadata by slug.
    async fn question(&self, title_slug: &str) -> leetcode::Result<QuestionDetail>;
}

#[async_trait]
impl SubmissionSource for LeetCodeClient {
    async fn list_submissions(
        &self,
        cursor: &SubmissionCursor,
        limit: u32,
    ) -> leetcode::Result<SubmissionPage> {
        LeetCodeClient::list_submissions(self, cursor, limit).await
    }

    async fn submission_detail(&self, submission_id: u64) -> leetcode::Result<SubmissionDetail> {
        LeetCodeClient::submission_detail(self, submission_id).await
    }

    async fn question(&self, title_slug: &str) -> leetcode::Result<QuestionDetail> {
        LeetCodeClient::question(self, title_slug).await
    }
}
