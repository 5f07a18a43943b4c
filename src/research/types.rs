//! Request and response bodies for `POST /api/research`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Client-selected execution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchMode {
    /// Single researcher graph, no supervisor
    Quick,
    /// Full multi-agent pipeline over the web
    #[default]
    DeepWeb,
    /// Full multi-agent pipeline; local sources depend on the graph's own setup
    DeepWebAndLocal,
    /// Direct chat-model call without the research pipeline
    LlmOnly,
}

impl ResearchMode {
    /// Wire name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchMode::Quick => "quick",
            ResearchMode::DeepWeb => "deep_web",
            ResearchMode::DeepWebAndLocal => "deep_web_and_local",
            ResearchMode::LlmOnly => "llm_only",
        }
    }
}

impl fmt::Display for ResearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a research request
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchRequest {
    /// The question to research; must not be blank
    pub question: String,
    /// Execution strategy, `deep_web` when omitted
    #[serde(default)]
    pub mode: ResearchMode,
    /// Report template name (accepted, currently not used)
    #[serde(default)]
    pub template: Option<String>,
    /// Chat-model provider for `llm_only`, e.g. "google_genai", "openai", "anthropic"
    #[serde(default)]
    pub provider: Option<String>,
    /// Chat model for `llm_only`, e.g. "gemini-2.5-pro", "gpt-4.1"
    #[serde(default)]
    pub model: Option<String>,
}

impl ResearchRequest {
    /// Request with only a question and mode set
    pub fn new(question: impl Into<String>, mode: ResearchMode) -> Self {
        Self {
            question: question.into(),
            mode,
            template: None,
            provider: None,
            model: None,
        }
    }

    /// True when the question is empty or whitespace-only
    pub fn is_blank(&self) -> bool {
        self.question.trim().is_empty()
    }
}

/// Body of a successful research response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResponse {
    /// Mode echoed from the request
    pub mode: ResearchMode,
    /// Question echoed from the request
    pub question: String,
    /// Report text, never empty
    pub final_report: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_defaults_to_deep_web() {
        let request: ResearchRequest =
            serde_json::from_str(r#"{"question": "What is RLHF?"}"#).unwrap();
        assert_eq!(request.mode, ResearchMode::DeepWeb);
        assert!(request.template.is_none());
        assert!(request.provider.is_none());
        assert!(request.model.is_none());
    }

    #[test]
    fn test_mode_wire_names() {
        for (raw, mode) in [
            ("quick", ResearchMode::Quick),
            ("deep_web", ResearchMode::DeepWeb),
            ("deep_web_and_local", ResearchMode::DeepWebAndLocal),
            ("llm_only", ResearchMode::LlmOnly),
        ] {
            let parsed: ResearchMode = serde_json::from_str(&format!("\"{}\"", raw)).unwrap();
            assert_eq!(parsed, mode);
            assert_eq!(mode.as_str(), raw);
            assert_eq!(serde_json::to_string(&mode).unwrap(), format!("\"{}\"", raw));
        }
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result: Result<ResearchRequest, _> =
            serde_json::from_str(r#"{"question": "q", "mode": "shallow"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_null_optionals_accepted() {
        let request: ResearchRequest = serde_json::from_str(
            r#"{"question": "q", "mode": "llm_only", "template": null, "provider": null, "model": "gpt-4.1"}"#,
        )
        .unwrap();
        assert_eq!(request.mode, ResearchMode::LlmOnly);
        assert_eq!(request.model.as_deref(), Some("gpt-4.1"));
    }

    #[test]
    fn test_blank_detection() {
        assert!(ResearchRequest::new("", ResearchMode::Quick).is_blank());
        assert!(ResearchRequest::new(" \t\n ", ResearchMode::Quick).is_blank());
        assert!(!ResearchRequest::new("  why?  ", ResearchMode::Quick).is_blank());
    }

    #[test]
    fn test_response_serialization() {
        let response = ResearchResponse {
            mode: ResearchMode::DeepWebAndLocal,
            question: "q".to_string(),
            final_report: "r".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["mode"], "deep_web_and_local");
        assert_eq!(json["question"], "q");
        assert_eq!(json["final_report"], "r");
    }
}
