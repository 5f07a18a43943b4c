//! Research module
//!
//! Request validation and mode dispatch for the research endpoint. A request
//! selects one of three collaborators by its [`ResearchMode`]; the dispatcher
//! seeds that collaborator with the question, awaits it exactly once, and
//! turns whatever it returns into a [`ResearchResponse`].

pub mod dispatcher;
pub mod report;
pub mod seed;
pub mod types;

pub use dispatcher::{ResearchDispatcher, Strategy};
pub use report::{
    AgentState, ChatCompletion, FinalReport, ResearcherState, NO_REPORT_PLACEHOLDER,
};
pub use seed::{AgentInputState, ChatMessage, ResearcherInput, ResearcherMessage};
pub use types::{ResearchMode, ResearchRequest, ResearchResponse};
