//! Request and response types for the LeetCode GraphQL surface.
//!
//! LeetCode is inconsistent about numeric fields: ids and timestamps come back
//! as JSON strings from some queries and as numbers from others, so both are
//! accepted.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Status string LeetCode reports for a fully correct submission.
pub const ACCEPTED: &str = "Accepted";

/// Pagination position for the submission listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionCursor {
    /// Number of submissions already skipped.
    pub offset: u32,
    /// Opaque continuation key returned by the previous page.
    pub last_key: Option<String>,
}

impl SubmissionCursor {
    /// Cursor for the page following `page`.
    pub fn advance(&self, page: &SubmissionPage, page_size: u32) -> Self {
        Self {
            offset: self.offset + page_size,
            last_key: page.last_key.clone(),
        }
    }
}

/// One row of the submission listing, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: u64,
    pub title: String,
    pub title_slug: String,
    pub status_display: String,
    pub lang: String,
    #[serde(deserialize_with = "string_or_number")]
    pub timestamp: i64,
}

impl SubmissionSummary {
    /// Whether LeetCode marked this attempt as accepted.
    pub fn is_accepted(&self) -> bool {
        self.status_display == ACCEPTED
    }
}

/// A page of the submission listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPage {
    #[serde(default)]
    pub last_key: Option<String>,
    pub has_next: bool,
    #[serde(default)]
    pub submissions: Vec<SubmissionSummary>,
}

/// Full detail of a single submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionDetail {
    pub lang: String,
    pub timestamp: i64,
    pub code: String,
    pub runtime_display: String,
    pub memory_display: String,
    pub runtime_percentile: Option<f64>,
    pub memory_percentile: Option<f64>,
}

/// Question metadata used to render the problem README.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDetail {
    pub question_id: String,
    pub title: String,
    pub title_slug: String,
    pub content: String,
    pub difficulty: String,
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a, V: Serialize> {
    #[serde(rename = "operationName")]
    pub operation_name: &'a str,
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlErrorEntry {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmissionListVariables<'a> {
    pub offset: u32,
    pub limit: u32,
    pub last_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_slug: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmissionListData {
    pub submission_list: Option<SubmissionPage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmissionDetailVariables {
    pub submission_id: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmissionDetailData {
    pub submission_details: Option<WireSubmissionDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireSubmissionDetail {
    #[serde(default)]
    pub runtime_display: String,
    #[serde(default)]
    pub runtime_percentile: Option<f64>,
    #[serde(default)]
    pub memory_display: String,
    #[serde(default)]
    pub memory_percentile: Option<f64>,
    pub code: String,
    #[serde(deserialize_with = "string_or_number")]
    pub timestamp: i64,
    pub lang: WireLang,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireLang {
    pub name: String,
}

impl From<WireSubmissionDetail> for SubmissionDetail {
    fn from(wire: WireSubmissionDetail) -> Self {
        Self {
            lang: wire.lang.name,
            timestamp: wire.timestamp,
            code: wire.code,
            runtime_display: wire.runtime_display,
            memory_display: wire.memory_display,
            runtime_percentile: wire.runtime_percentile,
            memory_percentile: wire.memory_percentile,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionVariables<'a> {
    pub title_slug: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionData {
    pub question: Option<WireQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireQuestion {
    pub question_id: String,
    pub title: String,
    pub title_slug: String,
    // Premium questions come back with a null body for non-premium sessions.
    #[serde(default)]
    pub content: Option<String>,
    pub difficulty: String,
    #[serde(default)]
    pub topic_tags: Vec<WireTopicTag>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireTopicTag {
    pub name: String,
}

impl From<WireQuestion> for QuestionDetail {
    fn from(wire: WireQuestion) -> Self {
        Self {
            question_id: wire.question_id,
            title: wire.title,
            title_slug: wire.title_slug,
            content: wire.content.unwrap_or_default(),
            difficulty: wire.difficulty,
            tags: wire.topic_tags.into_iter().map(|t| t.name).collect(),
        }
    }
}

fn string_or_number<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr + TryFrom<i64> + TryFrom<u64>,
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text.trim().parse::<T>().map_err(de::Error::custom),
        Raw::Signed(n) => T::try_from(n).map_err(|_| de::Error::custom("number out of range")),
        Raw::Unsigned(n) => T::try_from(n).map_err(|_| de::Error::custom("number out of range")),
    }
}
