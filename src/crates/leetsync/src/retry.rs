//! Retry logic with exponential backoff
//!
//! Wraps a fallible async operation. The delay before retry `n` (0-indexed) is
//! `initial_delay_secs * multiplier^n`, capped at `max_delay_secs`. With the
//! defaults that is `3^n` seconds: 1, 3, 9, 27, 81.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry policy
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first call
    pub max_retries: usize,

    /// Delay before the first retry (in seconds)
    pub initial_delay_secs: u64,

    /// Maximum delay between retries (in seconds)
    pub max_delay_secs: u64,

    /// Exponential base
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay_secs: 1,
            max_delay_secs: 300,
            multiplier: 3.0,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(max_retries: usize, initial_delay_secs: u64, max_delay_secs: u64, multiplier: f64) -> Self {
        Self {
            max_retries,
            initial_delay_secs,
            max_delay_secs,
            multiplier,
        }
    }

    /// Single attempt, failure surfaces immediately.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Same backoff curve with a different retry budget.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Calculate delay for a given retry index (0-indexed)
    pub fn calculate_delay(&self, attempt: usize) -> Duration {
        let delay_secs = (self.initial_delay_secs as f64) * self.multiplier.powi(attempt as i32);
        let capped_delay = delay_secs.min(self.max_delay_secs as f64);
        Duration::from_secs(capped_delay as u64)
    }
}

/// Execute an async operation under `policy`, retrying every failure.
///
/// The operation runs once, then up to `policy.max_retries` more times. The
/// final error is returned unchanged when the budget runs out.
pub async fn with_retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    operation_name: &str,
    operation: F,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    with_retry_if(policy, operation_name, |_: &E| true, operation).await
}

/// Like [`with_retry`], but only errors for which `should_retry` holds are
/// retried; any other error is returned after the attempt that produced it.
pub async fn with_retry_if<F, Fut, T, E, R>(
    policy: &RetryPolicy,
    operation_name: &str,
    should_retry: R,
    mut operation: F,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
    R: Fn(&E) -> bool,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        operation = %operation_name,
                        attempt = attempt + 1,
                        "Retry succeeded"
                    );
                }
                return Ok(result);
            }
            Err(e) if attempt < policy.max_retries && should_retry(&e) => {
                let delay = policy.calculate_delay(attempt);
                warn!(
                    operation = %operation_name,
                    attempt = attempt + 1,
                    max_retries = policy.max_retries,
                    delay_secs = delay.as_secs(),
                    error = %e,
                    "Operation failed, retrying after delay"
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if attempt >= policy.max_retries && policy.max_retries > 0 {
                    warn!(
                        operation = %operation_name,
                        attempt = attempt + 1,
                        error = %e,
                        "Operation failed, max retries exhausted"
                    );
                } else if attempt < policy.max_retries {
                    debug!(
                        operation = %operation_name,
                        error = %e,
                        "Operation failed with a non-retryable error"
                    );
                }
                return Err(e);
            }
        }
    }
}
