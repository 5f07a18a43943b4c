//! Application context
//!
//! Built once at startup (and again on each reload) and shared read-only with
//! every request handler.

use crate::collaborators::{HttpChatModel, RemoteGraph};
use crate::config::Config;
use crate::research::{
    AgentInputState, AgentState, ResearchDispatcher, ResearcherInput, ResearcherState,
};
use std::sync::Arc;

/// Shared handle passed to handlers
pub type SharedContext = Arc<AppContext>;

/// Everything a request handler needs
pub struct AppContext {
    /// Mode dispatcher over the configured collaborators
    pub dispatcher: ResearchDispatcher,
}

impl AppContext {
    /// Wrap an already-built dispatcher
    pub fn new(dispatcher: ResearchDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Build the HTTP-backed collaborators described by `config`
    ///
    /// All collaborators share one `reqwest::Client` (connection pooling).
    pub fn from_config(config: &Config) -> Self {
        let client = reqwest::Client::new();

        let chat_model = Arc::new(HttpChatModel::new(client.clone(), config.llm.clone()));
        let researcher: Arc<RemoteGraph<ResearcherInput, ResearcherState>> = Arc::new(
            RemoteGraph::new(
                client.clone(),
                config.graph.url.clone(),
                config.graph.researcher_assistant_id.clone(),
            ),
        );
        let full_agent: Arc<RemoteGraph<AgentInputState, AgentState>> = Arc::new(
            RemoteGraph::new(
                client,
                config.graph.url.clone(),
                config.graph.full_assistant_id.clone(),
            ),
        );

        let dispatcher = ResearchDispatcher::new(
            chat_model,
            researcher,
            full_agent,
            config.llm.default_provider.clone(),
            config.llm.default_model.clone(),
        );

        Self::new(dispatcher)
    }

    /// Wrap in an `Arc` for the router
    pub fn shared(self) -> SharedContext {
        Arc::new(self)
    }
}
