//! CorrectionEngine: turns client outcomes into [`CorrectionResult`] values.

use crate::config::CorrectionConfig;
use crate::correction::client::CorrectionClient;
use crate::correction::prompt;
use crate::correction::remote::RemoteCorrectionService;
use crate::correction::result::CorrectionResult;
use crate::defaults;
use crate::error::Result;

const TRACING_TARGET: &str = "grammarfix::engine";

/// Coordinates one correction request end to end.
///
/// This is the only place client errors become results: `get_correction`
/// never fails.
pub struct CorrectionEngine {
    client: Box<dyn CorrectionClient>,
}

impl CorrectionEngine {
    pub fn new(client: Box<dyn CorrectionClient>) -> Self {
        Self { client }
    }

    /// Build an engine backed by the remote service.
    ///
    /// Returns `Ok(None)` when no non-blank API key is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn create(config: &CorrectionConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.api_key() else {
            return Ok(None);
        };
        config.validate()?;
        let service = RemoteCorrectionService::new(api_key, config)?;
        Ok(Some(Self::new(Box::new(service))))
    }

    /// Name of the underlying client.
    pub fn client_name(&self) -> &str {
        self.client.name()
    }

    /// Get grammar and spelling correction for `text`.
    pub async fn get_correction(&self, text: &str) -> CorrectionResult {
        if prompt::is_blank(text) {
            return CorrectionResult::success(text, text);
        }

        match self.client.correct_text(text).await {
            Ok(Some(corrected)) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    client = self.client.name(),
                    changed = corrected != text,
                    "Correction succeeded"
                );
                CorrectionResult::success(text, corrected)
            }
            Ok(None) => CorrectionResult::failure(text, defaults::NULL_RESPONSE_MESSAGE),
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(
                    target: TRACING_TARGET,
                    client = self.client.name(),
                    error = %message,
                    "Correction failed"
                );
                if message.trim().is_empty() {
                    CorrectionResult::failure(text, defaults::UNKNOWN_ERROR_MESSAGE)
                } else {
                    CorrectionResult::failure(text, message)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correction::test_support::{MockClient, MockReply};
    use std::sync::Arc;

    fn engine_with(reply: MockReply) -> (CorrectionEngine, Arc<MockClient>) {
        let mock = Arc::new(MockClient::new(reply));
        let engine = CorrectionEngine::new(Box::new(Arc::clone(&mock)));
        (engine, mock)
    }

    #[tokio::test]
    async fn blank_input_short_circuits() {
        let (engine, mock) = engine_with(MockReply::Text("should not appear".into()));
        for text in ["", " ", "\n\t  "] {
            let result = engine.get_correction(text).await;
            assert_eq!(result, CorrectionResult::success(text, text));
        }
        assert_eq!(mock.calls(), 0, "Blank input must not reach the client");
    }

    #[tokio::test]
    async fn client_text_becomes_success() {
        let (engine, mock) = engine_with(MockReply::Text("The cat sat.".into()));
        let result = engine.get_correction("teh cat sat").await;
        assert_eq!(result, CorrectionResult::success("teh cat sat", "The cat sat."));
        assert_eq!(mock.seen(), vec!["teh cat sat".to_string()]);
    }

    #[tokio::test]
    async fn client_nothing_becomes_null_response_failure() {
        let (engine, _mock) = engine_with(MockReply::Nothing);
        let result = engine.get_correction("teh cat").await;
        assert!(!result.is_success());
        assert!(result.error_message().unwrap().contains("null response"));
    }

    #[tokio::test]
    async fn client_error_message_is_kept() {
        let (engine, _mock) = engine_with(MockReply::Fail("timed out".into()));
        let result = engine.get_correction("teh cat").await;
        assert_eq!(result, CorrectionResult::failure("teh cat", "timed out"));
    }

    #[tokio::test]
    async fn client_error_without_message_is_unknown() {
        let (engine, _mock) = engine_with(MockReply::Fail(String::new()));
        let result = engine.get_correction("teh cat").await;
        assert_eq!(
            result,
            CorrectionResult::failure("teh cat", "Unknown error occurred")
        );
    }

    #[test]
    fn create_without_key_is_none() {
        let config = CorrectionConfig::default();
        assert!(CorrectionEngine::create(&config).unwrap().is_none());

        let blank = CorrectionConfig {
            api_key: Some("  ".to_string()),
            ..CorrectionConfig::default()
        };
        assert!(CorrectionEngine::create(&blank).unwrap().is_none());
    }

    #[test]
    fn create_with_key_uses_remote_client() {
        let config = CorrectionConfig {
            api_key: Some("sk-test".to_string()),
            ..CorrectionConfig::default()
        };
        let engine = CorrectionEngine::create(&config).unwrap().unwrap();
        assert_eq!(engine.client_name(), "remote");
    }

    #[test]
    fn create_rejects_invalid_config() {
        let config = CorrectionConfig {
            api_key: Some("sk-test".to_string()),
            max_tokens: 0,
            ..CorrectionConfig::default()
        };
        assert!(CorrectionEngine::create(&config).is_err());
    }
}
