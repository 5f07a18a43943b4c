//! Conversation seeds
//!
//! The chat model and the full graph take `{"role": "user", ...}` messages,
//! while the researcher graph expects `{"type": "human", ...}` messages under
//! a different key. Both shapes start from the same question text.

use serde::{Deserialize, Serialize};

/// Role-tagged chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "user", "assistant", or "system"
    pub role: String,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// User turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Type-tagged message used by the researcher graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearcherMessage {
    /// "human" or "ai"
    #[serde(rename = "type")]
    pub message_type: String,
    /// Message text
    pub content: String,
}

impl ResearcherMessage {
    /// Human turn
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            message_type: "human".to_string(),
            content: content.into(),
        }
    }
}

/// Input state of the full multi-agent graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInputState {
    /// Conversation so far
    pub messages: Vec<ChatMessage>,
}

impl AgentInputState {
    /// One user message holding the question
    pub fn for_question(question: &str) -> Self {
        Self {
            messages: vec![ChatMessage::user(question)],
        }
    }
}

/// Input state of the single-agent researcher graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearcherInput {
    /// Conversation so far
    pub researcher_messages: Vec<ResearcherMessage>,
    /// Topic the researcher works on
    pub research_topic: String,
}

impl ResearcherInput {
    /// The question as both the human turn and the topic
    pub fn for_question(question: &str) -> Self {
        Self {
            researcher_messages: vec![ResearcherMessage::human(question)],
            research_topic: question.to_string(),
        }
    }
}

/// Single-turn message list for a direct model call
pub fn chat_seed(question: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::user(question)]
}
