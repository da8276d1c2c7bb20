//! Configuration management for leetsync
//!
//! Supports dual-location configuration:
//! - User-level: ~/.leetsync/leetsync.toml
//! - Project-level: ./.leetsync/leetsync.toml
//!
//! Project-level config overrides user-level config key by key.

mod loader;
mod schema;

pub use loader::ConfigLoader;
pub use schema::{GitHubSettings, LeetCodeSettings, LoggingConfig, SyncConfig, SyncSettings};

use crate::Result;

/// Load configuration from both locations with project config taking precedence
pub async fn load_config() -> Result<SyncConfig> {
    let loader = ConfigLoader::new()?;
    loader.load().await
}
