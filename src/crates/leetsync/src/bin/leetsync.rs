//! leetsync CLI
//!
//! Main entry point for the leetsync command-line tool.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use github::GitHubClient;
use leetcode::LeetCodeClient;
use leetsync::{load_config, version_info, SyncConfig, SyncEngine, SyncError};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

#[derive(Parser)]
#[command(name = "leetsync")]
#[command(about = "Mirror accepted LeetCode submissions into a GitHub repository", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Commit every accepted submission newer than the last sync
    Sync {
        #[command(flatten)]
        credentials: Credentials,

        /// Folder for problem directories
        #[arg(long)]
        destination_folder: Option<String>,

        /// Output format: text (default), json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show where the next sync resumes, without committing
    Checkpoint {
        #[command(flatten)]
        credentials: Credentials,

        /// Also list the submissions the next sync would commit
        #[arg(long)]
        pending: bool,
    },

    /// Write a configuration template to ~/.leetsync/leetsync.toml
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Show version information
    Version,
}

/// Credentials; flags win over environment, environment over config files.
#[derive(Args)]
struct Credentials {
    /// GitHub token with write access
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Target repository as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// LEETCODE_SESSION cookie
    #[arg(long, env = "LEETCODE_SESSION", hide_env_values = true)]
    leetcode_session: Option<String>,

    /// csrftoken cookie
    #[arg(long, env = "LEETCODE_CSRF_TOKEN", hide_env_values = true)]
    leetcode_csrf_token: Option<String>,
}

impl Credentials {
    fn apply(self, config: &mut SyncConfig) {
        if let Some(token) = self.github_token {
            config.github.token = Some(token);
        }
        if let Some(repository) = self.repository {
            config.github.repository = Some(repository);
        }
        if let Some(session) = self.leetcode_session {
            config.leetcode.session = Some(session);
        }
        if let Some(csrf) = self.leetcode_csrf_token {
            config.leetcode.csrf_token = Some(csrf);
        }
    }
}

/// Install the subscriber before anything logs. Without `RUST_LOG` the
/// filter starts at `info` and is narrowed to `logging.level` once the
/// configuration is loaded.
fn init_tracing() -> FilterHandle {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
    handle
}

fn apply_log_level(handle: &FilterHandle, level: &str) {
    if std::env::var_os("RUST_LOG").is_none() {
        set_log_level(handle, level);
    }
}

fn set_log_level(handle: &FilterHandle, level: &str) {
    match EnvFilter::try_new(level) {
        Ok(filter) => {
            if let Err(e) = handle.reload(filter) {
                warn!(error = %e, "Failed to apply logging.level");
            }
        }
        Err(e) => warn!(level, error = %e, "Invalid logging.level, keeping info"),
    }
}

async fn prepare(
    credentials: Credentials,
    log_filter: &FilterHandle,
) -> anyhow::Result<SyncEngine<LeetCodeClient, GitHubClient>> {
    let mut config = load_config().await?;
    config.apply_action_inputs(|name| std::env::var(name).ok())?;
    credentials.apply(&mut config);
    apply_log_level(log_filter, &config.logging.level);
    config.validate()?;

    let source = LeetCodeClient::new(config.leetcode_config()?)
        .context("failed to build LeetCode client")?;
    let host =
        GitHubClient::new(config.github_config()?).context("failed to build GitHub client")?;

    Ok(SyncEngine::new(source, host, config.sync_options()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_filter = init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Sync {
            credentials,
            destination_folder,
            format,
        }) => {
            let mut engine = prepare(credentials, &log_filter).await?;
            if destination_folder.is_some() {
                engine.options_mut().destination_folder = destination_folder;
            }

            match engine.run().await {
                Ok(report) => {
                    if format == "json" {
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    } else {
                        println!(
                            "Resumed after {} ({} pending)",
                            report.checkpoint.resume_timestamp, report.pending
                        );
                        for c in &report.committed {
                            println!("  {} {} ({})", &c.commit_sha, c.title, c.submission_id);
                        }
                        println!("✓ Committed {} submission(s)", report.committed.len());
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("✗ Sync failed: {}", e);
                    if let SyncError::Aborted { committed, head, .. } = &e {
                        eprintln!("  {} commit(s) kept, branch at {}", committed, head);
                    }
                    if e.is_auth_error() {
                        eprintln!("  Check the LeetCode cookies and GitHub token.");
                    }
                    Err(e.into())
                }
            }
        }
        Some(Commands::Checkpoint {
            credentials,
            pending,
        }) => {
            let engine = prepare(credentials, &log_filter).await?;
            let (checkpoint, head) = engine.resolve().await?;

            println!("Branch: {} at {}", head.default_branch, head.commit_sha);
            match (&checkpoint.marker_commit, &checkpoint.last_synced) {
                (Some(sha), Some(last)) => {
                    println!("Last sync commit: {} ({} in {})", sha, last.title, last.lang)
                }
                (Some(sha), None) => println!("Last sync commit: {}", sha),
                _ => println!("Last sync commit: none (full sync)"),
            }
            println!("Resume timestamp: {}", checkpoint.resume_timestamp);
            println!("Author: {} <{}>", checkpoint.author.name, checkpoint.author.email);

            if pending {
                let submissions = engine.collect_pending(&checkpoint).await?;
                println!("Pending: {}", submissions.len());
                for submission in &submissions {
                    println!(
                        "  {} {} [{}] ({})",
                        submission.timestamp, submission.title, submission.lang, submission.id
                    );
                }
            }
            Ok(())
        }
        Some(Commands::Init { force }) => {
            let path = leetsync::init::initialize(force)?;
            println!("✓ Configuration: {}", path.display());
            println!("\nSet the repository and credentials, then run `leetsync sync`.");
            Ok(())
        }
        Some(Commands::Version) => {
            println!("{}", version_info());
            Ok(())
        }
        None => {
            println!("leetsync - use --help for usage");
            Ok(())
        }
    }
}
