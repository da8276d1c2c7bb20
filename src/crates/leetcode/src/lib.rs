//! LeetCode client for submission history and question metadata.
//!
//! Talks to LeetCode's GraphQL endpoint with a session cookie and CSRF token
//! pair taken from a logged-in browser session.
//!
//! - [`LeetCodeClient::list_submissions`] pages through submissions, newest first
//! - [`LeetCodeClient::submission_detail`] fetches code and runtime statistics
//! - [`LeetCodeClient::question`] fetches the problem statement, difficulty and tags

pub mod client;
pub mod config;
pub mod error;
pub mod queries;
pub mod types;

pub use client::LeetCodeClient;
pub use config::LeetCodeConfig;
pub use error::{LeetCodeError, Result};
pub use types::{
    QuestionDetail, SubmissionCursor, SubmissionDetail, SubmissionPage, SubmissionSummary,
    ACCEPTED,
};
