//! Collaborators
//!
//! The external components that actually answer research questions: a chat
//! model and two research graphs served by a LangGraph-compatible server.
//! Each sits behind a trait so the dispatcher can be exercised against
//! in-process fakes.

pub mod error;
pub mod graph;
mod http;
pub mod llm;
pub mod llm_types;

pub use error::CollaboratorError;
pub use graph::RemoteGraph;
pub use llm::HttpChatModel;

use crate::research::{ChatCompletion, ChatMessage};
use async_trait::async_trait;

/// A single chat-completion call
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Provider identifier, e.g. "google_genai"
    pub provider: String,
    /// Model identifier, e.g. "gemini-2.5-pro"
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Conversation to complete
    pub messages: Vec<ChatMessage>,
}

/// Chat-model completion
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Complete `request` and return the reply
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, CollaboratorError>;
}

/// A compiled agent graph that turns an input state into a final state
#[async_trait]
pub trait AgentGraph<I, O>: Send + Sync
where
    I: Send + 'static,
{
    /// Run the graph to completion
    async fn invoke(&self, input: I) -> Result<O, CollaboratorError>;
}
