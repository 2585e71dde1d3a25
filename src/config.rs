use crate::defaults;
use crate::error::{GrammarFixError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub correction: CorrectionConfig,
}

/// Remote correction service configuration
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorrectionConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: defaults::API_URL.to_string(),
            model: defaults::MODEL.to_string(),
            temperature: defaults::TEMPERATURE,
            max_tokens: defaults::MAX_TOKENS,
            connect_timeout_ms: defaults::CONNECT_TIMEOUT_MS,
            read_timeout_ms: defaults::READ_TIMEOUT_MS,
        }
    }
}

// Keep the key out of logs and panic messages.
impl std::fmt::Debug for CorrectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorrectionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("read_timeout_ms", &self.read_timeout_ms)
            .finish()
    }
}

impl CorrectionConfig {
    /// The configured API key, if it is non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Reject values the endpoint would refuse or that make no sense locally.
    pub fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(GrammarFixError::ConfigInvalidValue {
                key: "correction.endpoint".to_string(),
                message: format!("'{}' is not an http(s) URL", self.endpoint),
            });
        }
        if self.model.trim().is_empty() {
            return Err(GrammarFixError::ConfigInvalidValue {
                key: "correction.model".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(GrammarFixError::ConfigInvalidValue {
                key: "correction.temperature".to_string(),
                message: "must be between 0 and 2".to_string(),
            });
        }
        if self.max_tokens == 0 {
            return Err(GrammarFixError::ConfigInvalidValue {
                key: "correction.max_tokens".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.connect_timeout_ms == 0 || self.read_timeout_ms == 0 {
            return Err(GrammarFixError::ConfigInvalidValue {
                key: "correction.timeout".to_string(),
                message: "timeouts must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).map_err(GrammarFixError::from)?;
        let config: Config = toml::from_str(&contents).map_err(GrammarFixError::from)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only a missing file yields defaults; invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e)
                if matches!(
                    e.downcast_ref::<GrammarFixError>(),
                    Some(GrammarFixError::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound
                ) =>
            {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.context(format!("Failed to load config from {}", path.display()))),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - GRAMMARFIX_API_KEY, then OPENAI_API_KEY → correction.api_key
    /// - GRAMMARFIX_MODEL → correction.model
    /// - GRAMMARFIX_ENDPOINT → correction.endpoint
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(key) =
            non_empty_env("GRAMMARFIX_API_KEY").or_else(|| non_empty_env("OPENAI_API_KEY"))
        {
            self.correction.api_key = Some(key);
        }

        if let Some(model) = non_empty_env("GRAMMARFIX_MODEL") {
            self.correction.model = model;
        }

        if let Some(endpoint) = non_empty_env("GRAMMARFIX_ENDPOINT") {
            self.correction.endpoint = endpoint;
        }

        self
    }

    /// Fall back to the key baked in at build time when none is configured.
    pub fn with_build_key(mut self) -> Self {
        if self.correction.api_key().is_none() && !defaults::BUILD_API_KEY.is_empty() {
            self.correction.api_key = Some(defaults::BUILD_API_KEY.to_string());
        }
        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/grammarfix/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("grammarfix")
            .join("config.toml")
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
