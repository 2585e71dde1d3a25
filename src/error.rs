//! Error types for grammarfix.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrammarFixError {
    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Correction service errors
    #[error("{}", crate::defaults::UNAVAILABLE_MESSAGE)]
    Unavailable,

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("No corrected text in API response")]
    EmptyResponse,

    #[error("Failed to parse API response: {message}")]
    MalformedResponse { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

impl GrammarFixError {
    /// Whether this error came from the transport rather than the API.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, GrammarFixError>;
