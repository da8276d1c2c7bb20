//! Per-problem README generation.
//!
//! The question body is LeetCode's HTML, which GitHub renders inline in
//! Markdown, so it is embedded as-is.

use crate::model::EnrichedSubmission;
use std::fmt::Write;

/// Render the README for a synced problem.
pub fn render(submission: &EnrichedSubmission) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "# [{}. {}](https://leetcode.com/problems/{}/)",
        submission.question_id, submission.title, submission.slug
    );
    out.push('\n');
    let _ = writeln!(out, "**Difficulty:** {}", submission.difficulty);
    out.push('\n');
    if !submission.tags.is_empty() {
        let _ = writeln!(out, "**Tags:** {}", submission.tags.join(", "));
        out.push('\n');
    }
    if !submission.runtime_display.is_empty() || !submission.memory_display.is_empty() {
        let _ = writeln!(
            out,
            "**Runtime:** {} | **Memory:** {}",
            or_na(&submission.runtime_display),
            or_na(&submission.memory_display)
        );
        out.push('\n');
    }
    out.push_str("---\n\n");

    if submission.question_body.trim().is_empty() {
        out.push_str("_Problem statement unavailable._\n");
    } else {
        out.push_str(submission.question_body.trim());
        out.push('\n');
    }

    out
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}
