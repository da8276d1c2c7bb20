//! # leetsync
//!
//! Incrementally mirrors accepted LeetCode submissions into a GitHub
//! repository, one commit per submission, dated at submission time.
//!
//! The repository itself is the only state: the newest commit whose message
//! starts with the sync marker holds the checkpoint, so every run picks up
//! after the last submission it committed.
//!
//! ```rust,no_run
//! use github::GitHubClient;
//! use leetcode::LeetCodeClient;
//! use leetsync::{load_config, SyncEngine};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = load_config().await?;
//! config.validate()?;
//!
//! let engine = SyncEngine::new(
//!     LeetCodeClient::new(config.leetcode_config()?)?,
//!     GitHubClient::new(config.github_config()?)?,
//!     config.sync_options(),
//! );
//! let report = engine.run().await?;
//! println!("committed {} submission(s)", report.committed.len());
//! # Ok(())
//! # }
//! ```

pub mod checkpoint;
pub mod commit;
pub mod config;
pub mod error;
pub mod host;
pub mod init;
pub mod language;
pub mod marker;
pub mod model;
pub mod readme;
pub mod retry;
pub mod source;
pub mod sync;
pub mod version;

pub use checkpoint::resolve_checkpoint;
pub use commit::CommitBuilder;
pub use config::{load_config, ConfigLoader, SyncConfig};
pub use error::{Result, SyncError};
pub use host::RepositoryHost;
pub use marker::{SyncMarker, DEFAULT_MARKER};
pub use model::{Checkpoint, EnrichedSubmission, RepositoryPointer, SubmissionRef};
pub use retry::{with_retry, with_retry_if, RetryPolicy};
pub use source::SubmissionSource;
pub use sync::{CommittedSubmission, SyncEngine, SyncOptions, SyncReport};

/// Version information
pub fn version_info() -> String {
    version::full_version()
}
