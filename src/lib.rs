//! grammarfix - Grammar and spelling correction for keyboard input
//!
//! Sends user-composed text to a hosted chat-completion endpoint and publishes
//! the correction to an observing presentation layer.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod correction;
pub mod defaults;
pub mod error;
pub mod feature;
pub mod output;
pub mod selection;
#[cfg(feature = "cli")]
pub mod telemetry;

// Core trait (text in, correction out)
pub use correction::client::CorrectionClient;

// Pipeline
pub use correction::engine::CorrectionEngine;
pub use correction::remote::RemoteCorrectionService;
pub use correction::result::CorrectionResult;
pub use feature::{CorrectionState, GrammarFixFeature};

// Error handling
pub use error::{GrammarFixError, Result};

// Config
pub use config::{Config, CorrectionConfig};

pub use selection::SelectionRange;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }

    #[test]
    fn version_string_contains_plus_when_git_hash_present() {
        let ver = version_string();
        if option_env!("GIT_HASH").is_some_and(|h| !h.is_empty()) {
            assert!(
                ver.contains('+'),
                "With GIT_HASH set, version should contain '+', got: {}",
                ver
            );
        } else {
            assert_eq!(ver, env!("CARGO_PKG_VERSION"));
        }
    }
}
