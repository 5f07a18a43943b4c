//! Chat model client
//!
//! Direct HTTP client for the chat providers `llm_only` requests can name.
//! The provider string picks the wire protocol; the model string is passed
//! through untouched.

use super::http::send_json;
use super::llm_types::{
    AnthropicRequest, AnthropicResponse, GeminiContent, GeminiGenerationConfig, GeminiPart,
    GeminiRequest, GeminiResponse, OpenAiMessage, OpenAiRequest, OpenAiResponse,
};
use super::{ChatModel, ChatRequest, CollaboratorError};
use crate::config::LlmConfig;
use crate::research::ChatCompletion;
use async_trait::async_trait;
use std::str::FromStr;

const GEMINI_SERVICE: &str = "Gemini API";
const OPENAI_SERVICE: &str = "OpenAI API";
const ANTHROPIC_SERVICE: &str = "Anthropic API";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Supported chat providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Google Gemini
    GoogleGenai,
    /// OpenAI chat completions
    OpenAi,
    /// Anthropic messages
    Anthropic,
}

impl FromStr for Provider {
    type Err = CollaboratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google_genai" => Ok(Provider::GoogleGenai),
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            other => Err(CollaboratorError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Chat model backed by the providers' HTTP APIs
pub struct HttpChatModel {
    client: reqwest::Client,
    config: LlmConfig,
}

impl HttpChatModel {
    /// Create a chat model sharing `client` (connection pooling)
    pub fn new(client: reqwest::Client, config: LlmConfig) -> Self {
        Self { client, config }
    }

    async fn complete_gemini(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatCompletion, CollaboratorError> {
        let api_key = require_key(
            self.config.google_api_key.as_deref(),
            &request.provider,
            "GOOGLE_API_KEY",
        )?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.gemini_base_url.trim_end_matches('/'),
            request.model
        );

        let body = GeminiRequest {
            contents: request
                .messages
                .iter()
                .map(|m| GeminiContent {
                    role: gemini_role(&m.role).to_string(),
                    parts: vec![GeminiPart {
                        text: m.content.clone(),
                    }],
                })
                .collect(),
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
            },
        };

        let parsed: GeminiResponse = send_json(
            GEMINI_SERVICE,
            self.client
                .post(&url)
                .header("x-goog-api-key", api_key)
                .json(&body),
        )
        .await?;

        if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(CollaboratorError::Blocked {
                service: GEMINI_SERVICE.to_string(),
                reason,
            });
        }

        let content = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        Ok(ChatCompletion { content })
    }

    async fn complete_openai(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatCompletion, CollaboratorError> {
        let api_key = require_key(
            self.config.openai_api_key.as_deref(),
            &request.provider,
            "OPENAI_API_KEY",
        )?;
        let url = format!(
            "{}/chat/completions",
            self.config.openai_base_url.trim_end_matches('/')
        );

        let body = OpenAiRequest {
            model: &request.model,
            messages: wire_messages(request),
            temperature: request.temperature,
        };

        let parsed: OpenAiResponse = send_json(
            OPENAI_SERVICE,
            self.client.post(&url).bearer_auth(api_key).json(&body),
        )
        .await?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(ChatCompletion { content })
    }

    async fn complete_anthropic(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatCompletion, CollaboratorError> {
        let api_key = require_key(
            self.config.anthropic_api_key.as_deref(),
            &request.provider,
            "ANTHROPIC_API_KEY",
        )?;
        let url = format!(
            "{}/messages",
            self.config.anthropic_base_url.trim_end_matches('/')
        );

        let body = AnthropicRequest {
            model: &request.model,
            max_tokens: self.config.anthropic_max_tokens,
            temperature: request.temperature,
            messages: wire_messages(request),
        };

        let parsed: AnthropicResponse = send_json(
            ANTHROPIC_SERVICE,
            self.client
                .post(&url)
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body),
        )
        .await?;

        let content = parsed
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<String>();

        Ok(ChatCompletion { content })
    }
}

#[async_trait]
impl ChatModel for HttpChatModel {
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, CollaboratorError> {
        let provider: Provider = request.provider.parse()?;

        tracing::debug!(
            provider = %request.provider,
            model = %request.model,
            temperature = request.temperature,
            messages = request.messages.len(),
            "Calling chat model"
        );

        let completion = match provider {
            Provider::GoogleGenai => self.complete_gemini(&request).await?,
            Provider::OpenAi => self.complete_openai(&request).await?,
            Provider::Anthropic => self.complete_anthropic(&request).await?,
        };

        tracing::debug!(
            response_len = completion.content.len(),
            "Received chat model response"
        );

        Ok(completion)
    }
}

fn require_key<'a>(
    key: Option<&'a str>,
    provider: &str,
    env_var: &'static str,
) -> Result<&'a str, CollaboratorError> {
    key.filter(|k| !k.is_empty())
        .ok_or_else(|| CollaboratorError::MissingApiKey {
            provider: provider.to_string(),
            env_var,
        })
}

fn gemini_role(role: &str) -> &'static str {
    match role {
        "assistant" => "model",
        _ => "user",
    }
}

fn wire_messages(request: &ChatRequest) -> Vec<OpenAiMessage<'_>> {
    request
        .messages
        .iter()
        .map(|m| OpenAiMessage {
            role: &m.role,
            content: &m.content,
        })
        .collect()
}
