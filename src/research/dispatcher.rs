//! Request validation and mode dispatch
//!
//! Maps a [`ResearchMode`] to one [`Strategy`], invokes that strategy's
//! collaborator exactly once, and normalizes the result through
//! [`FinalReport`]. Requests are independent; nothing here is mutated after
//! construction.

use super::report::{AgentState, FinalReport, ResearcherState};
use super::seed::{chat_seed, AgentInputState, ResearcherInput};
use super::types::{ResearchMode, ResearchRequest, ResearchResponse};
use crate::collaborators::{AgentGraph, ChatModel, ChatRequest, CollaboratorError};
use crate::error::AppError;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Temperature for direct model calls
pub const LLM_ONLY_TEMPERATURE: f32 = 0.0;

/// Single-agent researcher graph
pub type ResearcherGraph = dyn AgentGraph<ResearcherInput, ResearcherState>;
/// Full multi-agent research graph
pub type FullResearchGraph = dyn AgentGraph<AgentInputState, AgentState>;

/// How a request is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One chat-model completion
    DirectModel,
    /// The researcher graph without supervision
    SingleResearcher,
    /// The full multi-agent graph
    FullPipeline,
}

impl Strategy {
    /// The strategy for a mode
    ///
    /// `deep_web` and `deep_web_and_local` share the full graph; whether local
    /// sources are used is up to the graph's own configuration.
    pub fn for_mode(mode: ResearchMode) -> Self {
        match mode {
            ResearchMode::LlmOnly => Strategy::DirectModel,
            ResearchMode::Quick => Strategy::SingleResearcher,
            ResearchMode::DeepWeb | ResearchMode::DeepWebAndLocal => Strategy::FullPipeline,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::DirectModel => "direct_model",
            Strategy::SingleResearcher => "single_researcher",
            Strategy::FullPipeline => "full_pipeline",
        };
        f.write_str(name)
    }
}

/// Routes research requests to their collaborator
#[derive(Clone)]
pub struct ResearchDispatcher {
    chat_model: Arc<dyn ChatModel>,
    researcher: Arc<ResearcherGraph>,
    full_agent: Arc<FullResearchGraph>,
    default_provider: String,
    default_model: String,
}

impl ResearchDispatcher {
    /// Create a dispatcher over the three collaborators
    ///
    /// `default_provider` and `default_model` apply to `llm_only` requests
    /// that do not name their own.
    pub fn new(
        chat_model: Arc<dyn ChatModel>,
        researcher: Arc<ResearcherGraph>,
        full_agent: Arc<FullResearchGraph>,
        default_provider: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            chat_model,
            researcher,
            full_agent,
            default_provider: default_provider.into(),
            default_model: default_model.into(),
        }
    }

    /// Validate `request`, run its strategy, and build the response
    ///
    /// # Errors
    /// * `AppError::InvalidInput` if the question is blank (no collaborator is called)
    /// * `AppError::PipelineFailure` if the collaborator fails
    pub async fn dispatch(&self, request: ResearchRequest) -> Result<ResearchResponse, AppError> {
        if request.is_blank() {
            return Err(AppError::empty_question());
        }

        let strategy = Strategy::for_mode(request.mode);
        info!(
            mode = %request.mode,
            strategy = %strategy,
            question_len = request.question.len(),
            "Dispatching research request"
        );
        debug!(question = %request.question, "Research question");
        if let Some(template) = &request.template {
            debug!(template = %template, "Ignoring report template");
        }

        let final_report = self.run(strategy, &request).await.map_err(|e| {
            error!(
                mode = %request.mode,
                strategy = %strategy,
                error = %e,
                "Research collaborator failed"
            );
            AppError::from(e)
        })?;

        info!(
            mode = %request.mode,
            report_len = final_report.len(),
            "Research request completed"
        );

        Ok(ResearchResponse {
            mode: request.mode,
            question: request.question,
            final_report,
        })
    }

    async fn run(
        &self,
        strategy: Strategy,
        request: &ResearchRequest,
    ) -> Result<String, CollaboratorError> {
        let question = request.question.as_str();
        match strategy {
            Strategy::DirectModel => {
                let chat_request = self.chat_request(request);
                info!(
                    provider = %chat_request.provider,
                    model = %chat_request.model,
                    "Calling chat model directly"
                );
                Ok(self.chat_model.complete(chat_request).await?.into_report())
            }
            Strategy::SingleResearcher => Ok(self
                .researcher
                .invoke(ResearcherInput::for_question(question))
                .await?
                .into_report()),
            Strategy::FullPipeline => Ok(self
                .full_agent
                .invoke(AgentInputState::for_question(question))
                .await?
                .into_report()),
        }
    }

    fn chat_request(&self, request: &ResearchRequest) -> ChatRequest {
        ChatRequest {
            provider: non_blank(request.provider.as_deref())
                .unwrap_or(self.default_provider.as_str())
                .to_string(),
            model: non_blank(request.model.as_deref())
                .unwrap_or(self.default_model.as_str())
                .to_string(),
            temperature: LLM_ONLY_TEMPERATURE,
            messages: chat_seed(&request.question),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
