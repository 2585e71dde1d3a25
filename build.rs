//! Build script: embeds the git hash and the build-time API key.
//!
//! The key is read from `OPENAI_API_KEY` in the build environment so that
//! packaged builds can ship with a key baked in. An empty or missing key
//! leaves the feature unavailable unless one is configured at run time.

use std::process::Command;

fn main() {
    // Embed git short hash for version string
    if let Ok(output) = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        && output.status.success()
    {
        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=GIT_HASH={}", hash);
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");

    let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
    println!(
        "cargo:rustc-env=GRAMMARFIX_BUILD_API_KEY={}",
        normalize_key(&api_key)
    );
    println!("cargo:rerun-if-env-changed=OPENAI_API_KEY");
}

/// Strip whitespace and anything that would break a `rustc-env` line.
fn normalize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !c.is_control())
        .collect()
}

