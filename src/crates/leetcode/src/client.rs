//! LeetCode GraphQL client.
//!
//! # Example
//!
//! ```rust,ignore
//! use leetcode::{LeetCodeClient, LeetCodeConfig, SubmissionCursor};
//!
//! let config = LeetCodeConfig::from_env("LEETCODE_SESSION", "LEETCODE_CSRF_TOKEN")?;
//! let client = LeetCodeClient::new(config)?;
//!
//! let page = client.list_submissions(&SubmissionCursor::default(), 20).await?;
//! for submission in &page.submissions {
//!     println!("{} {}", submission.timestamp, submission.title);
//! }
//! ```

use crate::config::LeetCodeConfig;
use crate::error::{LeetCodeError, Result};
use crate::queries;
use crate::types::{
    GraphQlRequest, GraphQlResponse, QuestionData, QuestionDetail, QuestionVariables,
    SubmissionCursor, SubmissionDetail, SubmissionDetailData, SubmissionDetailVariables,
    SubmissionListData, SubmissionListVariables, SubmissionPage,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// LeetCode GraphQL API client.
#[derive(Clone)]
pub struct LeetCodeClient {
    config: LeetCodeConfig,
    client: Client,
}

impl LeetCodeClient {
    /// Create a new client with the given configuration.
    pub fn new(config: LeetCodeConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, client })
    }

    /// Active configuration.
    pub fn config(&self) -> &LeetCodeConfig {
        &self.config
    }

    /// Fetch one page of the authenticated user's submissions, newest first.
    pub async fn list_submissions(
        &self,
        cursor: &SubmissionCursor,
        limit: u32,
    ) -> Result<SubmissionPage> {
        let variables = SubmissionListVariables {
            offset: cursor.offset,
            limit,
            last_key: cursor.last_key.as_deref(),
            question_slug: None,
        };

        let data: SubmissionListData = self
            .execute("submissionList", queries::SUBMISSION_LIST, variables)
            .await?;

        data.submission_list.ok_or_else(|| {
            LeetCodeError::InvalidResponse("submissionList returned null".to_string())
        })
    }

    /// Fetch code and runtime statistics for a single submission.
    pub async fn submission_detail(&self, submission_id: u64) -> Result<SubmissionDetail> {
        let variables = SubmissionDetailVariables { submission_id };

        let data: SubmissionDetailData = self
            .execute("submissionDetails", queries::SUBMISSION_DETAILS, variables)
            .await?;

        data.submission_details
            .map(SubmissionDetail::from)
            .ok_or_else(|| LeetCodeError::NotFound(format!("submission {}", submission_id)))
    }

    /// Fetch question metadata by slug.
    pub async fn question(&self, title_slug: &str) -> Result<QuestionDetail> {
        let variables = QuestionVariables { title_slug };

        let data: QuestionData = self
            .execute("questionData", queries::QUESTION, variables)
            .await?;

        data.question
            .map(QuestionDetail::from)
            .ok_or_else(|| LeetCodeError::NotFound(format!("question {}", title_slug)))
    }

    async fn execute<V, T>(&self, operation_name: &str, query: &str, variables: V) -> Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let url = self.config.graphql_url();
        let body = GraphQlRequest {
            operation_name,
            query,
            variables,
        };

        debug!(operation = operation_name, "Sending LeetCode GraphQL request");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("cookie", self.config.cookie_header())
            .header("x-csrftoken", &self.config.csrf_token)
            .header("x-requested-with", "XMLHttpRequest")
            .header("referer", self.config.base_url.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                401 | 403 => LeetCodeError::AuthenticationError(error_text),
                429 => LeetCodeError::RateLimitExceeded(error_text),
                code => LeetCodeError::ApiError {
                    status: code,
                    message: error_text,
                },
            });
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| LeetCodeError::InvalidResponse(e.to_string()))?;

        decode_envelope(operation_name, envelope)
    }
}

fn decode_envelope<T>(operation_name: &str, envelope: GraphQlResponse<T>) -> Result<T> {
    if !envelope.errors.is_empty() {
        let message = envelope
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(LeetCodeError::GraphQlError(format!(
            "{}: {}",
            operation_name, message
        )));
    }

    envelope.data.ok_or_else(|| {
        LeetCodeError::InvalidResponse(format!("{} returned no data", operation_name))
    })
}
