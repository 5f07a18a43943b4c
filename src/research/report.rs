//! Final report extraction
//!
//! Every collaborator hands back its answer under a different field. The
//! [`FinalReport`] trait hides that so the dispatcher only sees text.

use serde::{Deserialize, Serialize};

/// Report text used when a collaborator returns nothing
pub const NO_REPORT_PLACEHOLDER: &str = "No report generated.";

/// A collaborator result that carries a report
pub trait FinalReport {
    /// The raw report field, if present
    fn report_text(&self) -> Option<&str>;

    /// The report, or the placeholder when the field is absent or empty
    fn into_report(self) -> String
    where
        Self: Sized,
    {
        match self.report_text() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => NO_REPORT_PLACEHOLDER.to_string(),
        }
    }
}

/// Result of a chat-model completion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// Text content of the reply
    pub content: String,
}

impl FinalReport for ChatCompletion {
    fn report_text(&self) -> Option<&str> {
        Some(&self.content)
    }
}

/// Final state of the researcher graph. Other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResearcherState {
    /// Compressed research notes
    #[serde(default)]
    pub compressed_research: Option<String>,
}

impl FinalReport for ResearcherState {
    fn report_text(&self) -> Option<&str> {
        self.compressed_research.as_deref()
    }
}

/// Final state of the full multi-agent graph. Other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AgentState {
    /// Final written report
    #[serde(default)]
    pub final_report: Option<String>,
}

impl FinalReport for AgentState {
    fn report_text(&self) -> Option<&str> {
        self.final_report.as_deref()
    }
}
