//! Sync orchestrator.
//!
//! One run: resolve the checkpoint from commit history, page through new
//! submissions newest-first until the checkpoint is reached, then enrich and
//! commit them oldest-first. The branch pointer is threaded through the commit
//! chain by value; a failure stops the run with every earlier commit in place,
//! so the next run picks up exactly where this one stopped.

use crate::checkpoint::{head_pointer, resolve_checkpoint};
use crate::commit::{normalize_name, CommitBuilder};
use crate::error::{Result, SyncError};
use crate::host::RepositoryHost;
use crate::marker::DEFAULT_MARKER;
use crate::model::{Checkpoint, EnrichedSubmission, RepositoryPointer, SubmissionRef};
use crate::retry::{with_retry_if, RetryPolicy};
use crate::source::SubmissionSource;
use github::GitHubError;
use leetcode::{LeetCodeError, SubmissionCursor};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Tunables for a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Submissions requested per listing page.
    pub page_size: u32,

    /// Pause between listing pages, independent of retry backoff.
    pub page_delay: Duration,

    /// Commits inspected when looking for the checkpoint.
    pub history_depth: u32,

    /// Backoff for every source call after the first listing page.
    pub retry: RetryPolicy,

    /// Literal commit message prefix identifying sync commits.
    pub marker: String,

    /// Optional path prefix for problem directories.
    pub destination_folder: Option<String>,

    /// Skip older accepted submissions of the same problem and language within
    /// this many seconds of a newer kept one. 0 keeps every submission.
    pub filter_duplicate_secs: i64,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            page_size: 20,
            page_delay: Duration::from_secs(1),
            history_depth: 100,
            retry: RetryPolicy::default(),
            marker: DEFAULT_MARKER.to_string(),
            destination_folder: None,
            filter_duplicate_secs: 0,
        }
    }
}

/// A submission that made it onto the branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommittedSubmission {
    pub submission_id: u64,
    pub title: String,
    pub timestamp: i64,
    pub commit_sha: String,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub checkpoint: Checkpoint,
    /// Accepted submissions newer than the checkpoint.
    pub pending: usize,
    pub committed: Vec<CommittedSubmission>,
    pub head: RepositoryPointer,
}

/// Drives a sync from a submission source into a repository host.
pub struct SyncEngine<S, H> {
    source: S,
    host: H,
    options: SyncOptions,
}

impl<S: SubmissionSource, H: RepositoryHost> SyncEngine<S, H> {
    pub fn new(source: S, host: H, options: SyncOptions) -> Self {
        Self {
            source,
            host,
            options,
        }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut SyncOptions {
        &mut self.options
    }

    /// Run a full sync.
    pub async fn run(&self) -> Result<SyncReport> {
        let (checkpoint, mut pointer) = self.resolve().await?;

        let pending = self.collect_pending(&checkpoint).await?;
        info!(
            pending = pending.len(),
            resume_timestamp = checkpoint.resume_timestamp,
            "Collected submissions to sync"
        );

        let builder = CommitBuilder::new(&self.host, checkpoint.author.clone(), &self.options.marker)
            .with_destination_folder(self.options.destination_folder.clone());

        let mut committed = Vec::with_capacity(pending.len());
        for submission in &pending {
            let outcome = async {
                let enriched = self.enrich(submission).await?;
                builder.commit(pointer.clone(), &enriched).await
            }
            .await;

            match outcome {
                Ok(next) => {
                    committed.push(CommittedSubmission {
                        submission_id: submission.id,
                        title: submission.title.clone(),
                        timestamp: submission.timestamp,
                        commit_sha: next.commit_sha.clone(),
                    });
                    pointer = next;
                }
                Err(e) if committed.is_empty() => return Err(e),
                Err(e) => {
                    warn!(
                        committed = committed.len(),
                        head = %pointer.commit_sha,
                        error = %e,
                        "Sync aborted; earlier commits are kept"
                    );
                    return Err(SyncError::Aborted {
                        committed: committed.len(),
                        head: pointer.commit_sha,
                        source: Box::new(e),
                    });
                }
            }
        }

        info!(committed = committed.len(), head = %pointer.commit_sha, "Sync complete");

        Ok(SyncReport {
            checkpoint,
            pending: pending.len(),
            committed,
            head: pointer,
        })
    }

    /// Checkpoint plus the branch head new commits build on.
    ///
    /// Both reads are idempotent, so transient host failures are retried.
    /// Writes in the commit builder are not.
    pub async fn resolve(&self) -> Result<(Checkpoint, RepositoryPointer)> {
        let policy = &self.options.retry;

        let commits = with_retry_if(policy, "list_commits", GitHubError::is_retryable, || {
            self.host.list_commits(self.options.history_depth)
        })
        .await?;
        let checkpoint = resolve_checkpoint(&commits, &self.options.marker)?;

        let repository = with_retry_if(policy, "get_repository", GitHubError::is_retryable, || {
            self.host.get_repository()
        })
        .await?;
        let pointer = head_pointer(&commits, &repository.default_branch)?;

        Ok((checkpoint, pointer))
    }

    /// Accepted submissions newer than the checkpoint, oldest first.
    ///
    /// The first page is fetched without retries so bad credentials fail at
    /// once. Listing stops at the first entry at or below the checkpoint,
    /// unless the source has been seen returning out-of-order timestamps, in
    /// which case every page is scanned and the result sorted.
    pub async fn collect_pending(&self, checkpoint: &Checkpoint) -> Result<Vec<SubmissionRef>> {
        let page_size = self.options.page_size;
        let mut cursor = SubmissionCursor::default();
        let mut pending = Vec::new();
        let mut scan = ListingScan::new(checkpoint.resume_timestamp, self.options.filter_duplicate_secs);
        let mut first_page = true;

        loop {
            let policy = if first_page {
                RetryPolicy::no_retry()
            } else {
                sleep(self.options.page_delay).await;
                self.options.retry.clone()
            };
            first_page = false;

            debug!(offset = cursor.offset, "Fetching submission page");
            let page = with_retry_if(&policy, "list_submissions", LeetCodeError::is_retryable, || {
                self.source.list_submissions(&cursor, page_size)
            })
            .await?;

            let mut reached_checkpoint = false;
            for entry in &page.submissions {
                match scan.consider(SubmissionRef::from(entry), entry.is_accepted()) {
                    Consider::Keep(submission) => pending.push(submission),
                    Consider::Skip => {}
                    Consider::Stop => {
                        reached_checkpoint = true;
                        break;
                    }
                }
            }

            if reached_checkpoint || !page.has_next {
                break;
            }
            cursor = cursor.advance(&page, page_size);
        }

        pending.reverse();
        if !scan.ordered {
            pending.sort_by_key(|s| s.timestamp);
        }
        Ok(pending)
    }

    /// Fetch detail and question for `submission` and build the commit payload.
    pub async fn enrich(&self, submission: &SubmissionRef) -> Result<EnrichedSubmission> {
        let policy = &self.options.retry;

        let detail = with_retry_if(policy, "submission_detail", LeetCodeError::is_retryable, || {
            self.source.submission_detail(submission.id)
        })
        .await?;

        let question = with_retry_if(policy, "question", LeetCodeError::is_retryable, || {
            self.source.question(&submission.title_slug)
        })
        .await?;

        if detail.timestamp != submission.timestamp {
            debug!(
                submission_id = submission.id,
                listing = submission.timestamp,
                detail = detail.timestamp,
                "Detail timestamp differs from listing; using listing"
            );
        }

        Ok(EnrichedSubmission::assemble(submission, detail, question))
    }
}

enum Consider {
    Keep(SubmissionRef),
    Skip,
    Stop,
}

/// Per-run listing state: checkpoint cut-off, order check, duplicate filter.
struct ListingScan {
    resume_timestamp: i64,
    filter_duplicate_secs: i64,
    previous: Option<i64>,
    ordered: bool,
    kept: HashMap<(String, String), i64>,
}

impl ListingScan {
    fn new(resume_timestamp: i64, filter_duplicate_secs: i64) -> Self {
        Self {
            resume_timestamp,
            filter_duplicate_secs,
            previous: None,
            ordered: true,
            kept: HashMap::new(),
        }
    }

    fn consider(&mut self, submission: SubmissionRef, accepted: bool) -> Consider {
        if let Some(previous) = self.previous {
            if self.ordered && submission.timestamp > previous {
                warn!(
                    submission_id = submission.id,
                    timestamp = submission.timestamp,
                    previous,
                    "Submission listing is not in descending time order; scanning all pages"
                );
                self.ordered = false;
            }
        }
        self.previous = Some(submission.timestamp);

        if submission.timestamp <= self.resume_timestamp {
            return if self.ordered { Consider::Stop } else { Consider::Skip };
        }
        if !accepted {
            return Consider::Skip;
        }

        if self.filter_duplicate_secs > 0 {
            let key = (normalize_name(&submission.title), submission.lang.clone());
            if let Some(&newer) = self.kept.get(&key) {
                if (newer - submission.timestamp).abs() < self.filter_duplicate_secs {
                    debug!(
                        submission_id = submission.id,
                        title = %submission.title,
                        "Skipping near-duplicate accepted submission"
                    );
                    return Consider::Skip;
                }
            }
            self.kept.insert(key, submission.timestamp);
        }

        Consider::Keep(submission)
    }
}
