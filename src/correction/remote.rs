//! Remote correction via a hosted chat-completion endpoint.
//!
//! One correction is one POST. The request carries a fixed instruction and the
//! user's text; the reply is the first choice's message content. Transport
//! failures, API-reported failures and unusable replies each map to their own
//! [`GrammarFixError`] variant.

use crate::config::CorrectionConfig;
use crate::correction::client::CorrectionClient;
use crate::correction::prompt::{self, ChatMessage};
use crate::error::{GrammarFixError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const TRACING_TARGET: &str = "grammarfix::remote";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<ChatChoice>>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ChatResponse {
    fn first_content(&self) -> Option<&str> {
        self.choices
            .as_ref()?
            .first()?
            .message
            .content
            .as_deref()
    }
}

/// Correction client for OpenAI-compatible chat-completion endpoints.
pub struct RemoteCorrectionService {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl RemoteCorrectionService {
    /// Create a service with its own HTTP client.
    ///
    /// The client fails fast on connection establishment
    /// (`connect_timeout_ms`) and allows slower generations
    /// (`read_timeout_ms`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, config: &CorrectionConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .read_timeout(config.read_timeout())
            .user_agent(concat!("grammarfix/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GrammarFixError::Other(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_http_client(http, api_key, config))
    }

    /// Create a service around an existing HTTP client.
    pub fn with_http_client(
        http: reqwest::Client,
        api_key: impl Into<String>,
        config: &CorrectionConfig,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request<'a>(&'a self, text: &str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: prompt::build_messages(text),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl CorrectionClient for RemoteCorrectionService {
    async fn correct_text(&self, text: &str) -> Result<Option<String>> {
        if prompt::is_blank(text) {
            return Ok(Some(text.to_string()));
        }

        let request = self.build_request(text);
        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %self.endpoint,
            model = %self.model,
            chars = text.chars().count(),
            "Sending correction request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(network_error)?;

        interpret_response(status, &body).map(Some)
    }

    fn name(&self) -> &str {
        "remote"
    }
}

/// Turn an HTTP status and body into corrected text or a classified error.
fn interpret_response(status: u16, body: &str) -> Result<String> {
    if status == 200 {
        let response: ChatResponse = serde_json::from_str(body).map_err(|e| {
            tracing::error!(target: TRACING_TARGET, error = %e, "Unparseable API response");
            GrammarFixError::MalformedResponse {
                message: e.to_string(),
            }
        })?;

        return match response.first_content().map(str::trim) {
            Some(corrected) if !corrected.is_empty() => Ok(corrected.to_string()),
            _ => {
                tracing::error!(
                    target: TRACING_TARGET,
                    body,
                    "API returned success but no corrected text in response"
                );
                Err(GrammarFixError::EmptyResponse)
            }
        };
    }

    let message = serde_json::from_str::<ChatResponse>(body)
        .ok()
        .and_then(|response| response.error)
        .and_then(|error| error.message)
        .unwrap_or_else(|| format!("HTTP {status}: {body}"));
    tracing::error!(target: TRACING_TARGET, status, %message, "API error");
    Err(GrammarFixError::Api { status, message })
}

fn network_error(err: reqwest::Error) -> GrammarFixError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    if err.is_timeout() && !message.contains("timed out") {
        message = format!("request timed out: {message}");
    }
    tracing::warn!(target: TRACING_TARGET, %message, "Network error");
    GrammarFixError::Network { message }
}
