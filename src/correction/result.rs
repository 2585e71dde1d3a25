//! Outcome of a single correction attempt.

use serde::Serialize;

/// Result of a grammar correction attempt.
///
/// Exactly one of `corrected_text` and `error_message` is present, selected by
/// `success`. Fields are private so the only way to build a value is through
/// [`CorrectionResult::success`] or [`CorrectionResult::failure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionResult {
    original_text: String,
    corrected_text: Option<String>,
    success: bool,
    error_message: Option<String>,
}

impl CorrectionResult {
    pub fn success(original_text: impl Into<String>, corrected_text: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            corrected_text: Some(corrected_text.into()),
            success: true,
            error_message: None,
        }
    }

    pub fn failure(original_text: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            corrected_text: None,
            success: false,
            error_message: Some(error_message.into()),
        }
    }

    /// Text that was sent for correction.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Corrected text, present only on success.
    pub fn corrected_text(&self) -> Option<&str> {
        self.corrected_text.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Error message, present only on failure.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Whether the correction differs from the original text.
    pub fn is_changed(&self) -> bool {
        self.corrected_text
            .as_deref()
            .is_some_and(|corrected| corrected != self.original_text)
    }
}
