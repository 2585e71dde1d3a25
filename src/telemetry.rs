//! Tracing initialization for the command-line front end.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initializes the tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set. Otherwise the level follows the CLI flags:
/// quiet → error, default → warn, `-v` → info, `-vv` → debug, `-vvv` → trace.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed or the filter is
/// invalid.
pub fn init_tracing(quiet: bool, verbose: u8) -> anyhow::Result<()> {
    let env_filter = create_env_filter(default_level(quiet, verbose))?;
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .with_level(true);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    Ok(())
}

/// Level used when `RUST_LOG` is not set.
fn default_level(quiet: bool, verbose: u8) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}

/// Creates an environment filter for tracing.
fn create_env_filter(default: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {e}"))
}
