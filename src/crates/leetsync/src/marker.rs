//! Sync marker: the commit message format that identifies engine-produced
//! commits.
//!
//! ```text
//! Sync LeetCode submission - Two Sum (python3) [difficulty: Easy] [tags: Array, Hash Table] [runtime: 52 ms] [memory: 14.2 MB]
//! ```
//!
//! Checkpoint recovery only relies on the literal prefix. The bracketed fields
//! are for humans and for [`SyncMarker::parse`].

use crate::model::EnrichedSubmission;
use regex::Regex;
use serde::Serialize;

/// Default literal prefix of every sync commit message.
pub const DEFAULT_MARKER: &str = "Sync LeetCode submission";

/// Structured metadata carried by a sync commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncMarker {
    pub title: String,
    pub lang: String,
    pub difficulty: Option<String>,
    pub tags: Vec<String>,
    pub runtime: Option<String>,
    pub memory: Option<String>,
}

impl SyncMarker {
    /// Metadata for a submission about to be committed.
    pub fn for_submission(submission: &EnrichedSubmission) -> Self {
        Self {
            title: submission.title.clone(),
            lang: submission.lang.clone(),
            difficulty: non_empty(&submission.difficulty),
            tags: submission.tags.clone(),
            runtime: non_empty(&submission.runtime_display),
            memory: non_empty(&submission.memory_display),
        }
    }

    /// Full commit message with `prefix` in front.
    pub fn message(&self, prefix: &str) -> String {
        let mut message = format!("{} - {} ({})", prefix, self.title, self.lang);
        if let Some(difficulty) = &self.difficulty {
            message.push_str(&format!(" [difficulty: {}]", difficulty));
        }
        if !self.tags.is_empty() {
            message.push_str(&format!(" [tags: {}]", self.tags.join(", ")));
        }
        if let Some(runtime) = &self.runtime {
            message.push_str(&format!(" [runtime: {}]", runtime));
        }
        if let Some(memory) = &self.memory {
            message.push_str(&format!(" [memory: {}]", memory));
        }
        message
    }

    /// Recover metadata from a commit message written by [`SyncMarker::message`].
    ///
    /// Returns `None` when the message does not start with `prefix` or the
    /// title/language part is missing.
    pub fn parse(prefix: &str, message: &str) -> Option<Self> {
        let first_line = message.lines().next()?;
        let rest = first_line.strip_prefix(prefix)?.strip_prefix(" - ")?;

        let head = Regex::new(r"^(?P<title>.+?) \((?P<lang>[^()]+)\)(?P<fields>(?: \[[^\]]*\])*)$")
            .ok()?;
        let caps = head.captures(rest)?;

        let mut marker = Self {
            title: caps["title"].to_string(),
            lang: caps["lang"].to_string(),
            difficulty: None,
            tags: Vec::new(),
            runtime: None,
            memory: None,
        };

        let field = Regex::new(r"\[(?P<key>[a-z]+): (?P<value>[^\]]*)\]").ok()?;
        for caps in field.captures_iter(&caps["fields"]) {
            let value = caps["value"].to_string();
            match &caps["key"] {
                "difficulty" => marker.difficulty = Some(value),
                "tags" => {
                    marker.tags = value
                        .split(", ")
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect()
                }
                "runtime" => marker.runtime = Some(value),
                "memory" => marker.memory = Some(value),
                _ => {}
            }
        }

        Some(marker)
    }
}

/// Whether `message` was produced by the engine.
pub fn is_sync_commit(prefix: &str, message: &str) -> bool {
    message.starts_with(prefix)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
