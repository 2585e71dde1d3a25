//! Default configuration constants for grammarfix.
//!
//! Shared between the configuration layer, the remote client and the
//! feature coordinator so every layer agrees on the same values.

/// Chat-completion endpoint used when none is configured.
pub const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Model identifier sent with every request.
pub const MODEL: &str = "gpt-4o-mini";

/// Sampling temperature.
///
/// Low randomness keeps corrections close to the input.
pub const TEMPERATURE: f32 = 0.3;

/// Upper bound on completion tokens.
///
/// Bounds both cost and runaway completions.
pub const MAX_TOKENS: u32 = 1000;

/// Connection establishment timeout in milliseconds.
pub const CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Response read timeout in milliseconds.
///
/// Longer than the connect timeout: generation can be slow, but an
/// unreachable host should fail fast.
pub const READ_TIMEOUT_MS: u64 = 30_000;

/// Message published when no correction service is configured.
pub const UNAVAILABLE_MESSAGE: &str =
    "AI service not available. Please set OPENAI_API_KEY or configure correction.api_key.";

/// Message used when the client yields nothing without failing.
pub const NULL_RESPONSE_MESSAGE: &str = "AI service returned null response";

/// Message used when a failure carries no text of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// API key captured from `OPENAI_API_KEY` at build time (empty if unset).
pub const BUILD_API_KEY: &str = env!("GRAMMARFIX_BUILD_API_KEY");
