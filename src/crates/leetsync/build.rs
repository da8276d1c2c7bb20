use std::env;

fn main() {
    // Set build number from env or default
    let build_number = env::var("BUILD_NUMBER").unwrap_or_else(|_| "0".to_string());
    println!("cargo:rustc-env=BUILD_NUMBER={}", build_number);

    // Prefer the hosted-runner commit, then the local checkout
    let git_commit = env::var("GIT_COMMIT")
        .or_else(|_| env::var("GITHUB_SHA").map(|sha| sha.chars().take(7).collect()))
        .unwrap_or_else(|_| {
            std::process::Command::new("git")
                .args(["rev-parse", "--short", "HEAD"])
                .output()
                .ok()
                .and_then(|output| String::from_utf8(output.stdout).ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "unknown".to_string())
        });
    println!("cargo:rustc-env=GIT_COMMIT={}", git_commit);

    let build_time = chrono::Utc::now().to_rfc3339();
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_time);

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=BUILD_NUMBER");
    println!("cargo:rerun-if-env-changed=GIT_COMMIT");
}
