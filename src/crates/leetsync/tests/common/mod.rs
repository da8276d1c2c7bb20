//! In-memory submission source and repository host for engine tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use github::{CommitSummary, GitHubError, Identity, NewCommit, Repository, Signature, TreeEntry};
use leetcode::{
    LeetCodeError, QuestionDetail, SubmissionCursor, SubmissionDetail, SubmissionPage,
    SubmissionSummary,
};
use leetsync::{RepositoryHost, SubmissionSource, SyncOptions};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ACCEPTED: &str = "Accepted";
pub const WRONG_ANSWER: &str = "Wrong Answer";

/// Options with no page delay and no duplicate filter.
pub fn test_options(page_size: u32) -> SyncOptions {
    SyncOptions {
        page_size,
        page_delay: Duration::ZERO,
        filter_duplicate_secs: 0,
        ..SyncOptions::default()
    }
}

pub fn summary(id: u64, title: &str, lang: &str, status: &str, timestamp: i64) -> SubmissionSummary {
    SubmissionSummary {
        id,
        title: title.to_string(),
        title_slug: slug(title),
        status_display: status.to_string(),
        lang: lang.to_string(),
        timestamp,
    }
}

pub fn slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

// ---------------------------------------------------------------------------
// Submission source
// ---------------------------------------------------------------------------

#[derive(Default)]
struct SourceState {
    list_calls: Vec<u32>,
    detail_calls: Vec<u64>,
    list_failures: HashMap<u32, usize>,
    detail_failures: HashMap<u64, usize>,
    malformed_details: HashSet<u64>,
}

/// Serves a fixed listing in the order given, paged by offset.
#[derive(Clone, Default)]
pub struct FakeSource {
    listing: Arc<Vec<SubmissionSummary>>,
    state: Arc<Mutex<SourceState>>,
}

impl FakeSource {
    pub fn new(listing: Vec<SubmissionSummary>) -> Self {
        Self {
            listing: Arc::new(listing),
            state: Arc::default(),
        }
    }

    /// Fail the next `times` listing requests at `offset`.
    pub fn fail_listing(&self, offset: u32, times: usize) {
        self.state.lock().unwrap().list_failures.insert(offset, times);
    }

    /// Fail the next `times` detail requests for `id`.
    pub fn fail_detail(&self, id: u64, times: usize) {
        self.state.lock().unwrap().detail_failures.insert(id, times);
    }

    /// Answer every detail request for `id` with a payload that cannot be decoded.
    pub fn malform_detail(&self, id: u64) {
        self.state.lock().unwrap().malformed_details.insert(id);
    }

    /// Offsets requested, in order.
    pub fn list_calls(&self) -> Vec<u32> {
        self.state.lock().unwrap().list_calls.clone()
    }

    pub fn detail_calls(&self) -> Vec<u64> {
        self.state.lock().unwrap().detail_calls.clone()
    }

    fn find(&self, id: u64) -> Option<&SubmissionSummary> {
        self.listing.iter().find(|s| s.id == id)
    }
}

fn take_failure<K: std::hash::Hash + Eq>(failures: &mut HashMap<K, usize>, key: &K) -> bool {
    match failures.get_mut(key) {
        Some(remaining) if *remaining > 0 => {
            *remaining -= 1;
            true
        }
        _ => false,
    }
}

#[async_trait]
impl SubmissionSource for FakeSource {
    async fn list_submissions(
        &self,
        cursor: &SubmissionCursor,
        limit: u32,
    ) -> leetcode::Result<SubmissionPage> {
        {
            let mut state = self.state.lock().unwrap();
            state.list_calls.push(cursor.offset);
            if take_failure(&mut state.list_failures, &cursor.offset) {
                return Err(LeetCodeError::ApiError {
                    status: 502,
                    message: "bad gateway".to_string(),
                });
            }
        }

        let start = (cursor.offset as usize).min(self.listing.len());
        let end = (start + limit as usize).min(self.listing.len());
        Ok(SubmissionPage {
            last_key: Some(format!("key-{}", end)),
            has_next: end < self.listing.len(),
            submissions: self.listing[start..end].to_vec(),
        })
    }

    async fn submission_detail(&self, submission_id: u64) -> leetcode::Result<SubmissionDetail> {
        {
            let mut state = self.state.lock().unwrap();
            state.detail_calls.push(submission_id);
            if take_failure(&mut state.detail_failures, &submission_id) {
                return Err(LeetCodeError::RateLimitExceeded("slow down".to_string()));
            }
            if state.malformed_details.contains(&submission_id) {
                return Err(LeetCodeError::InvalidResponse(
                    "missing field `code`".to_string(),
                ));
            }
        }

        let summary = self
            .find(submission_id)
            .ok_or_else(|| LeetCodeError::NotFound(format!("submission {}", submission_id)))?;
        Ok(SubmissionDetail {
            lang: summary.lang.clone(),
            timestamp: summary.timestamp,
            code: format!("// {} solution {}\n", summary.title, summary.id),
            runtime_display: "4 ms".to_string(),
            memory_display: "8.1 MB".to_string(),
            runtime_percentile: Some(91.5),
            memory_percentile: None,
        })
    }

    async fn question(&self, title_slug: &str) -> leetcode::Result<QuestionDetail> {
        let summary = self
            .listing
            .iter()
            .find(|s| s.title_slug == title_slug)
            .ok_or_else(|| LeetCodeError::NotFound(format!("question {}", title_slug)))?;
        Ok(QuestionDetail {
            question_id: summary.id.to_string(),
            title: summary.title.clone(),
            title_slug: title_slug.to_string(),
            content: format!("<p>Solve {}.</p>", summary.title),
            difficulty: "Easy".to_string(),
            tags: vec!["Array".to_string()],
        })
    }
}

// ---------------------------------------------------------------------------
// Repository host
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct StoredCommit {
    pub summary: CommitSummary,
    pub parent: Option<String>,
}

#[derive(Default)]
struct HostState {
    commits: HashMap<String, StoredCommit>,
    trees: HashMap<String, BTreeMap<String, String>>,
    head: Option<String>,
    next_id: usize,
    create_commit_calls: usize,
    list_commits_calls: usize,
    list_commits_failures: usize,
    fail_create_commit_at: Option<usize>,
}

/// A single-branch repository kept in memory.
#[derive(Clone, Default)]
pub struct FakeHost {
    state: Arc<Mutex<HostState>>,
}

impl FakeHost {
    /// Repository with one initial commit by `owner`.
    pub fn with_initial_commit(owner: &Identity) -> Self {
        let host = Self::default();
        host.seed_commit("Initial commit", owner, 1_600_000_000, &[("README.md", "# Solutions\n")]);
        host
    }

    /// Append a commit directly, bypassing the API surface.
    pub fn seed_commit(
        &self,
        message: &str,
        who: &Identity,
        timestamp: i64,
        files: &[(&str, &str)],
    ) -> String {
        let mut state = self.state.lock().unwrap();
        let parent = state.head.clone();
        let mut tree = parent
            .as_ref()
            .and_then(|sha| state.commits.get(sha))
            .and_then(|c| state.trees.get(&c.summary.tree_sha))
            .cloned()
            .unwrap_or_default();
        for (path, content) in files {
            tree.insert(path.to_string(), content.to_string());
        }

        state.next_id += 1;
        let tree_sha = format!("seed-tree-{}", state.next_id);
        let sha = format!("seed-{}", state.next_id);
        let date = Utc.timestamp_opt(timestamp, 0).unwrap();
        state.trees.insert(tree_sha.clone(), tree);
        state.commits.insert(
            sha.clone(),
            StoredCommit {
                summary: CommitSummary {
                    sha: sha.clone(),
                    message: message.to_string(),
                    author: Signature::new(who, date),
                    committer: Signature::new(who, date),
                    tree_sha,
                },
                parent,
            },
        );
        state.head = Some(sha.clone());
        sha
    }

    /// Fail the `n`th create_commit call (1-based) once.
    pub fn fail_create_commit_at(&self, n: usize) {
        self.state.lock().unwrap().fail_create_commit_at = Some(n);
    }

    /// Fail the next `times` history requests with a server error.
    pub fn fail_list_commits(&self, times: usize) {
        self.state.lock().unwrap().list_commits_failures = times;
    }

    pub fn list_commits_calls(&self) -> usize {
        self.state.lock().unwrap().list_commits_calls
    }

    pub fn head(&self) -> Option<String> {
        self.state.lock().unwrap().head.clone()
    }

    /// Commits reachable from head, newest first.
    pub fn history(&self) -> Vec<CommitSummary> {
        let state = self.state.lock().unwrap();
        let mut out = Vec::new();
        let mut cursor = state.head.clone();
        while let Some(sha) = cursor {
            let Some(commit) = state.commits.get(&sha) else { break };
            out.push(commit.summary.clone());
            cursor = commit.parent.clone();
        }
        out
    }

    /// Files in the tree of the head commit.
    pub fn head_files(&self) -> BTreeMap<String, String> {
        let state = self.state.lock().unwrap();
        state
            .head
            .as_ref()
            .and_then(|sha| state.commits.get(sha))
            .and_then(|c| state.trees.get(&c.summary.tree_sha))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl RepositoryHost for FakeHost {
    async fn list_commits(&self, per_page: u32) -> github::Result<Vec<CommitSummary>> {
        {
            let mut state = self.state.lock().unwrap();
            state.list_commits_calls += 1;
            if state.list_commits_failures > 0 {
                state.list_commits_failures -= 1;
                return Err(GitHubError::ApiError {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
        }
        Ok(self.history().into_iter().take(per_page as usize).collect())
    }

    async fn get_repository(&self) -> github::Result<Repository> {
        Ok(Repository {
            default_branch: "main".to_string(),
        })
    }

    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> github::Result<String> {
        let mut state = self.state.lock().unwrap();
        let mut tree = state
            .trees
            .get(base_tree)
            .cloned()
            .ok_or_else(|| GitHubError::NotFound(format!("tree {}", base_tree)))?;
        for entry in entries {
            tree.insert(entry.path.clone(), entry.content.clone());
        }

        state.next_id += 1;
        let sha = format!("tree-{}", state.next_id);
        state.trees.insert(sha.clone(), tree);
        Ok(sha)
    }

    async fn create_commit(&self, commit: &NewCommit) -> github::Result<String> {
        let mut state = self.state.lock().unwrap();
        state.create_commit_calls += 1;
        if state.fail_create_commit_at == Some(state.create_commit_calls) {
            state.fail_create_commit_at = None;
            return Err(GitHubError::ApiError {
                status: 500,
                message: "internal error".to_string(),
            });
        }

        state.next_id += 1;
        let sha = format!("commit-{}", state.next_id);
        state.commits.insert(
            sha.clone(),
            StoredCommit {
                summary: CommitSummary {
                    sha: sha.clone(),
                    message: commit.message.clone(),
                    author: commit.author.clone(),
                    committer: commit.committer.clone(),
                    tree_sha: commit.tree.clone(),
                },
                parent: commit.parents.first().cloned(),
            },
        );
        Ok(sha)
    }

    async fn update_ref(&self, branch: &str, sha: &str, _force: bool) -> github::Result<()> {
        if branch != "main" {
            return Err(GitHubError::NotFound(format!("branch {}", branch)));
        }
        let mut state = self.state.lock().unwrap();
        if !state.commits.contains_key(sha) {
            return Err(GitHubError::NotFound(format!("commit {}", sha)));
        }
        state.head = Some(sha.to_string());
        Ok(())
    }
}
