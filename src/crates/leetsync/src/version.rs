//! Version metadata injected at compile time by `build.rs`.

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build number (from CI or default to 0)
pub const BUILD_NUMBER: &str = env!("BUILD_NUMBER");

/// Git commit hash (short form)
pub const GIT_COMMIT: &str = env!("GIT_COMMIT");

/// Build timestamp (RFC3339 format)
pub const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");

/// Full version line, e.g.
/// `leetsync v0.1.0 (build 42, commit abc123, built 2025-01-15T10:30:00Z)`.
pub fn full_version() -> String {
    format!(
        "leetsync v{} (build {}, commit {}, built {})",
        VERSION, BUILD_NUMBER, GIT_COMMIT, BUILD_TIMESTAMP
    )
}

/// `v0.1.0`
pub fn short_version() -> String {
    format!("v{}", VERSION)
}
