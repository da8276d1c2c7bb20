//! First-time setup: writes a commented configuration template.

use crate::error::{Result, SyncError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default configuration directory name
pub const CONFIG_DIR: &str = ".leetsync";

/// Default configuration file name
pub const CONFIG_FILE: &str = "leetsync.toml";

/// Get the leetsync home directory (~/.leetsync)
pub fn leetsync_home() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR))
        .ok_or_else(|| SyncError::Config("Could not determine home directory".to_string()))
}

/// Write the user-level configuration template
///
/// Existing configuration is kept unless `force` is set. Returns the path of
/// the configuration file.
pub fn initialize(force: bool) -> Result<PathBuf> {
    initialize_in(&leetsync_home()?, force)
}

/// Write the configuration template into `dir`
pub fn initialize_in(dir: &Path, force: bool) -> Result<PathBuf> {
    info!(path = %dir.display(), "Initializing leetsync");

    if !dir.exists() {
        fs::create_dir_all(dir)
            .map_err(|e| SyncError::Config(format!("Failed to create directory: {}", e)))?;
    }

    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() || force {
        fs::write(&config_path, DEFAULT_CONFIG)
            .map_err(|e| SyncError::Config(format!("Failed to write configuration: {}", e)))?;
        info!(path = %config_path.display(), "Created default configuration");
    } else {
        warn!(path = %config_path.display(), "Configuration already exists (use --force to overwrite)");
    }

    Ok(config_path)
}

const DEFAULT_CONFIG: &str = r#"# leetsync configuration
#
# User-level settings live in ~/.leetsync/leetsync.toml.
# Project-specific settings can be placed in ./.leetsync/leetsync.toml

[github]
# Token with contents:write on the target repository
token = "${GITHUB_TOKEN}"

# Target repository as owner/name
# repository = "octocat/leetcode"

# Commits inspected when looking for the last sync commit (1-100)
history_depth = 100

[leetcode]
# Browser cookies from a signed-in session
session = "${LEETCODE_SESSION}"
csrf_token = "${LEETCODE_CSRF_TOKEN}"

# Submissions per listing page
page_size = 20

# Pause between listing pages in milliseconds
page_delay_ms = 1000

[sync]
# Retries for LeetCode calls after the first listing page
max_retries = 5

# Backoff base: waits 1, 3, 9, 27... seconds
retry_base_secs = 3.0

# Put problem directories under this folder (optional)
# destination_folder = "problems"

# Skip older accepted submissions of the same problem and language
# made within this many seconds of a newer one (0 keeps all)
filter_duplicate_secs = 0

# Prefix that identifies sync commits; changing it restarts from scratch
commit_message = "Sync LeetCode submission"

[logging]
# Log level: "trace", "debug", "info", "warn", "error"
level = "info"
"#;
