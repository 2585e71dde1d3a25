//! Prompt construction for LLM-based correction.

use serde::{Deserialize, Serialize};

/// Instruction sent as the system message of every request.
pub const SYSTEM_PROMPT: &str = "You are a grammar and spelling correction assistant.
Your task is to correct grammar, spelling, and improve clarity while preserving the original meaning and style.
Return ONLY the corrected text, without any explanations, prefixes, or additional commentary.
If the text is already correct, return it unchanged.";

/// One chat message on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Build the message list for correcting `text`: instruction first, then the
/// user's text verbatim.
pub fn build_messages(text: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(text)]
}

/// Whether `text` is empty or whitespace only.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
