//! Chat provider wire types
//!
//! Structs that mirror the request and response JSON of the supported chat
//! providers. Only the fields this service reads or writes are modelled.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Gemini (google_genai)
// ---------------------------------------------------------------------------

/// Request structure for Gemini `generateContent`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation turns
    pub contents: Vec<GeminiContent>,
    /// Generation configuration
    pub generation_config: GeminiGenerationConfig,
}

/// A single conversation turn
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct GeminiContent {
    /// "user" or "model"
    #[serde(default)]
    pub role: String,
    /// Content parts (typically one text part)
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// A single content part
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct GeminiPart {
    /// Text content of this part
    #[serde(default)]
    pub text: String,
}

/// Generation configuration for requests
#[derive(Serialize, Debug)]
pub struct GeminiGenerationConfig {
    /// Sampling temperature
    pub temperature: f32,
}

/// Top-level Gemini response
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Candidate responses from the model
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    /// Feedback about the prompt (e.g. if it was blocked)
    #[serde(default)]
    pub prompt_feedback: Option<GeminiPromptFeedback>,
}

/// A single candidate response
#[derive(Deserialize, Debug)]
pub struct GeminiCandidate {
    /// Candidate content; missing when generation stopped early
    #[serde(default)]
    pub content: Option<GeminiContent>,
}

/// Feedback about the prompt
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPromptFeedback {
    /// Reason the prompt was blocked
    #[serde(default)]
    pub block_reason: Option<String>,
}

// ---------------------------------------------------------------------------
// OpenAI chat completions
// ---------------------------------------------------------------------------

/// Request structure for `/chat/completions`
#[derive(Serialize, Debug)]
pub struct OpenAiRequest<'a> {
    /// Model name
    pub model: &'a str,
    /// Conversation
    pub messages: Vec<OpenAiMessage<'a>>,
    /// Sampling temperature
    pub temperature: f32,
}

/// Message in an OpenAI request
#[derive(Serialize, Debug)]
pub struct OpenAiMessage<'a> {
    /// "user", "assistant", or "system"
    pub role: &'a str,
    /// Message text
    pub content: &'a str,
}

/// Top-level OpenAI response
#[derive(Deserialize, Debug)]
pub struct OpenAiResponse {
    /// Completion choices
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
}

/// A completion choice
#[derive(Deserialize, Debug)]
pub struct OpenAiChoice {
    /// Assistant message
    pub message: OpenAiResponseMessage,
}

/// Assistant message in a response
#[derive(Deserialize, Debug)]
pub struct OpenAiResponseMessage {
    /// Text content; null for tool-call-only replies
    #[serde(default)]
    pub content: Option<String>,
}

// ---------------------------------------------------------------------------
// Anthropic messages
// ---------------------------------------------------------------------------

/// Request structure for `/messages`
#[derive(Serialize, Debug)]
pub struct AnthropicRequest<'a> {
    /// Model name
    pub model: &'a str,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Conversation
    pub messages: Vec<OpenAiMessage<'a>>,
}

/// Top-level Anthropic response
#[derive(Deserialize, Debug)]
pub struct AnthropicResponse {
    /// Content blocks
    #[serde(default)]
    pub content: Vec<AnthropicContentBlock>,
}

/// A content block; only text blocks carry `text`
#[derive(Deserialize, Debug)]
pub struct AnthropicContentBlock {
    /// Block type, e.g. "text"
    #[serde(rename = "type")]
    pub block_type: String,
    /// Text of a text block
    #[serde(default)]
    pub text: Option<String>,
}
