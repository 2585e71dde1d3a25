//! Command-line interface for grammarfix
//!
//! Provides argument parsing using clap derive macros.

use crate::selection::SelectionRange;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Grammar and spelling correction via a hosted LLM
#[derive(Parser, Debug)]
#[command(
    name = "grammarfix",
    version,
    about = "Grammar and spelling correction via a hosted LLM",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Subcommand to execute (default: correct)
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub correct: CorrectArgs,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress diagnostics (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Options for a correction request
#[derive(Args, Debug, Default, Clone)]
pub struct CorrectArgs {
    /// Text to correct (reads stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Show a word diff of the correction on stderr
    #[arg(long)]
    pub diff: bool,

    /// Correct only this byte range of the input (START:END) and splice it back
    #[arg(long, value_name = "START:END")]
    pub select: Option<SelectionRange>,

    /// Response read timeout (e.g., 30s, 1m)
    #[arg(long, value_name = "DURATION", value_parser = parse_timeout_ms)]
    pub timeout: Option<u64>,
}

/// Parse a timeout string into milliseconds.
///
/// Supports bare numbers (seconds) and any `humantime` duration (`500ms`,
/// `30s`, `1m30s`).
fn parse_timeout_ms(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let millis = if let Ok(secs) = s.parse::<u64>() {
        secs.saturating_mul(1000)
    } else {
        humantime::parse_duration(s)
            .map_err(|e| e.to_string())?
            .as_millis()
            .try_into()
            .map_err(|_| format!("timeout '{s}' is too large"))?
    };
    if millis == 0 {
        return Err("timeout must be positive".to_string());
    }
    Ok(millis)
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Correct text from an argument or stdin
    Correct(CorrectArgs),

    /// Show whether correction is available and the effective settings
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
