//! Application configuration
//!
//! Centralized configuration with environment variable support, an optional
//! TOML overlay file, and sensible defaults. Command-line flags are applied
//! on top by the launcher.

use crate::error::BootstrapError;
use serde::Deserialize;
use std::env;
use std::net::SocketAddr;
use std::path::Path;

/// Default chat-model provider for `llm_only` requests
pub const DEFAULT_PROVIDER: &str = "google_genai";
/// Default chat model for `llm_only` requests
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
const DEFAULT_ANTHROPIC_MAX_TOKENS: u32 = 4096;
const DEFAULT_GRAPH_URL: &str = "http://127.0.0.1:2024";
const DEFAULT_RESEARCHER_ASSISTANT: &str = "researcher";
const DEFAULT_FULL_ASSISTANT: &str = "research_agent_full";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Chat model configuration
    pub llm: LlmConfig,
    /// Research graph server configuration
    pub graph: GraphConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to bind the server to
    pub port: u16,
}

/// Chat model configuration
#[derive(Clone)]
pub struct LlmConfig {
    /// Provider used when a request names none
    pub default_provider: String,
    /// Model used when a request names none
    pub default_model: String,
    /// Google Gemini API key
    pub google_api_key: Option<String>,
    /// OpenAI API key
    pub openai_api_key: Option<String>,
    /// Anthropic API key
    pub anthropic_api_key: Option<String>,
    /// Gemini API base URL
    pub gemini_base_url: String,
    /// OpenAI API base URL
    pub openai_base_url: String,
    /// Anthropic API base URL
    pub anthropic_base_url: String,
    /// `max_tokens` sent to Anthropic, which requires it
    pub anthropic_max_tokens: u32,
}

// Keys stay out of the startup log line.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.default_model)
            .field("google_api_key", &self.google_api_key.as_ref().map(|_| "***"))
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "***"))
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "***"),
            )
            .field("gemini_base_url", &self.gemini_base_url)
            .field("openai_base_url", &self.openai_base_url)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("anthropic_max_tokens", &self.anthropic_max_tokens)
            .finish()
    }
}

/// Research graph server configuration
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Base URL of the LangGraph-compatible server
    pub url: String,
    /// Assistant id of the single-agent researcher graph
    pub researcher_assistant_id: String,
    /// Assistant id of the full multi-agent graph
    pub full_assistant_id: String,
}

/// TOML overlay file. Every field is optional; present fields win over the
/// environment.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// `[server]` table
    #[serde(default)]
    pub server: FileServerConfig,
    /// `[llm]` table
    #[serde(default)]
    pub llm: FileLlmConfig,
    /// `[graph]` table
    #[serde(default)]
    pub graph: FileGraphConfig,
}

#[allow(missing_docs)]
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[allow(missing_docs)]
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLlmConfig {
    pub default_provider: Option<String>,
    pub default_model: Option<String>,
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub gemini_base_url: Option<String>,
    pub openai_base_url: Option<String>,
    pub anthropic_base_url: Option<String>,
    pub anthropic_max_tokens: Option<u32>,
}

#[allow(missing_docs)]
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileGraphConfig {
    pub url: Option<String>,
    pub researcher_assistant_id: Option<String>,
    pub full_assistant_id: Option<String>,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            server: ServerConfig {
                host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: var("PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(DEFAULT_PORT),
            },
            llm: LlmConfig {
                default_provider: var("RESEARCH_DEFAULT_PROVIDER")
                    .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
                default_model: var("RESEARCH_DEFAULT_MODEL")
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                google_api_key: var("GOOGLE_API_KEY").or_else(|| var("GEMINI_API_KEY")),
                openai_api_key: var("OPENAI_API_KEY"),
                anthropic_api_key: var("ANTHROPIC_API_KEY"),
                gemini_base_url: var("GEMINI_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
                openai_base_url: var("OPENAI_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                anthropic_base_url: var("ANTHROPIC_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
                anthropic_max_tokens: var("ANTHROPIC_MAX_TOKENS")
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(DEFAULT_ANTHROPIC_MAX_TOKENS),
            },
            graph: GraphConfig {
                url: var("LANGGRAPH_URL").unwrap_or_else(|| DEFAULT_GRAPH_URL.to_string()),
                researcher_assistant_id: var("RESEARCHER_ASSISTANT_ID")
                    .unwrap_or_else(|| DEFAULT_RESEARCHER_ASSISTANT.to_string()),
                full_assistant_id: var("FULL_AGENT_ASSISTANT_ID")
                    .unwrap_or_else(|| DEFAULT_FULL_ASSISTANT.to_string()),
            },
        }
    }

    /// Load the environment, overlay `path` if given, and validate
    ///
    /// # Errors
    /// * `BootstrapError::ConfigNotFound` if `path` does not exist
    /// * `BootstrapError::ConfigParse` if the file is not valid TOML
    /// * `BootstrapError::InvalidConfig` if validation fails
    pub fn load(path: Option<&Path>) -> Result<Self, BootstrapError> {
        let mut config = Self::from_env();
        if let Some(path) = path {
            config.apply_file(FileConfig::read(path)?);
        }
        config.validate()?;
        Ok(config)
    }

    /// Overlay values present in a config file
    pub fn apply_file(&mut self, file: FileConfig) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }
        fn set_opt(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }

        set(&mut self.server.host, file.server.host);
        set(&mut self.server.port, file.server.port);

        let llm = file.llm;
        set(&mut self.llm.default_provider, llm.default_provider);
        set(&mut self.llm.default_model, llm.default_model);
        set_opt(&mut self.llm.google_api_key, llm.google_api_key);
        set_opt(&mut self.llm.openai_api_key, llm.openai_api_key);
        set_opt(&mut self.llm.anthropic_api_key, llm.anthropic_api_key);
        set(&mut self.llm.gemini_base_url, llm.gemini_base_url);
        set(&mut self.llm.openai_base_url, llm.openai_base_url);
        set(&mut self.llm.anthropic_base_url, llm.anthropic_base_url);
        set(&mut self.llm.anthropic_max_tokens, llm.anthropic_max_tokens);

        set(&mut self.graph.url, file.graph.url);
        set(
            &mut self.graph.researcher_assistant_id,
            file.graph.researcher_assistant_id,
        );
        set(&mut self.graph.full_assistant_id, file.graph.full_assistant_id);
    }

    /// Reject values the collaborators cannot work with
    pub fn validate(&self) -> Result<(), BootstrapError> {
        if self.llm.default_provider.trim().is_empty() {
            return Err(BootstrapError::InvalidConfig(
                "default provider cannot be empty".to_string(),
            ));
        }
        if self.llm.default_model.trim().is_empty() {
            return Err(BootstrapError::InvalidConfig(
                "default model cannot be empty".to_string(),
            ));
        }
        if self.llm.anthropic_max_tokens == 0 {
            return Err(BootstrapError::InvalidConfig(
                "anthropic_max_tokens must be > 0".to_string(),
            ));
        }
        if self.graph.researcher_assistant_id.trim().is_empty()
            || self.graph.full_assistant_id.trim().is_empty()
        {
            return Err(BootstrapError::InvalidConfig(
                "graph assistant ids cannot be empty".to_string(),
            ));
        }
        reqwest::Url::parse(&self.graph.url).map_err(|e| {
            BootstrapError::InvalidConfig(format!("graph url '{}': {}", self.graph.url, e))
        })?;
        Ok(())
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Resolve the server address; the host may be an IP literal or a hostname
    ///
    /// # Errors
    /// * `BootstrapError::InvalidAddress` if the host does not resolve
    pub async fn resolve_addr(&self) -> Result<SocketAddr, BootstrapError> {
        let addr = self.server_addr();
        let mut candidates =
            tokio::net::lookup_host((self.server.host.as_str(), self.server.port))
                .await
                .map_err(|e| BootstrapError::InvalidAddress(format!("{}: {}", addr, e)))?;
        candidates.next().ok_or_else(|| {
            BootstrapError::InvalidAddress(format!("{}: no addresses resolved", addr))
        })
    }
}

impl FileConfig {
    /// Read and parse a TOML config file
    pub fn read(path: &Path) -> Result<Self, BootstrapError> {
        if !path.exists() {
            return Err(BootstrapError::ConfigNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| BootstrapError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| BootstrapError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
