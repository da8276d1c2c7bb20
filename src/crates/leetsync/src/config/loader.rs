//! Configuration loader with dual-location support
//!
//! Loads configuration from:
//! 1. Default values
//! 2. User-level config: ~/.leetsync/leetsync.toml
//! 3. Project-level config: ./.leetsync/leetsync.toml
//!
//! Files are merged table by table, so a project file that only sets
//! `github.repository` keeps the token from the user file.

use crate::config::schema::SyncConfig;
use crate::error::{Result, SyncError};
use crate::init::{CONFIG_DIR, CONFIG_FILE};
use std::path::{Path, PathBuf};
use tokio::fs;
use toml::Table;
use tracing::{debug, info};

/// Configuration loader that handles both user and project configs
pub struct ConfigLoader {
    user_config_path: PathBuf,
    project_config_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the standard locations
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| SyncError::Config("Could not determine home directory".to_string()))?;
        let cwd = std::env::current_dir()?;

        Ok(Self::with_paths(
            home.join(CONFIG_DIR).join(CONFIG_FILE),
            cwd.join(CONFIG_DIR).join(CONFIG_FILE),
        ))
    }

    /// Create a loader for explicit file locations
    pub fn with_paths(user_config_path: impl Into<PathBuf>, project_config_path: impl Into<PathBuf>) -> Self {
        Self {
            user_config_path: user_config_path.into(),
            project_config_path: project_config_path.into(),
        }
    }

    /// Load configuration from both locations with project taking precedence
    ///
    /// Missing files are skipped. A file that exists but does not parse is an
    /// error.
    pub async fn load(&self) -> Result<SyncConfig> {
        let mut merged = Table::new();
        info!("Loading configuration with defaults");

        for path in [&self.user_config_path, &self.project_config_path] {
            if !path.exists() {
                debug!(path = %path.display(), "Config file not found, skipping");
                continue;
            }
            let table = Self::read_table(path).await?;
            debug!(path = %path.display(), "Loaded config file");
            merge_tables(&mut merged, table);
        }

        let mut config: SyncConfig = toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| SyncError::Config(format!("Failed to parse config: {}", e)))?;

        config.resolve_env_vars();

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from a specific path
    pub async fn load_from_path(path: &Path) -> Result<SyncConfig> {
        let table = Self::read_table(path).await?;
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| SyncError::Config(format!("Failed to parse config: {}", e)))
    }

    async fn read_table(path: &Path) -> Result<Table> {
        if !path.exists() {
            return Err(SyncError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| SyncError::Config(format!("Failed to read config: {}", e)))?;

        content
            .parse::<Table>()
            .map_err(|e| SyncError::Config(format!("Failed to parse config {}: {}", path.display(), e)))
    }

    /// Get user config path
    pub fn user_config_path(&self) -> &Path {
        &self.user_config_path
    }

    /// Get project config path
    pub fn project_config_path(&self) -> &Path {
        &self.project_config_path
    }
}

/// Recursively merge `overlay` into `base`; scalar values in `overlay` win.
fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
