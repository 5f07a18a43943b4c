//! Collaborator error types
//!
//! Errors raised while calling a chat model or a research graph. All of them
//! surface to the client as a pipeline failure carrying this message.

use thiserror::Error;

/// Errors that can occur while invoking a collaborator
#[derive(Error, Debug)]
pub enum CollaboratorError {
    /// No client exists for the requested provider
    #[error("Unsupported model provider: {0}")]
    UnsupportedProvider(String),

    /// The provider needs an API key that is not configured
    #[error("{provider} API key is not configured (set {env_var})")]
    MissingApiKey {
        /// Provider identifier
        provider: String,
        /// Environment variable that holds the key
        env_var: &'static str,
    },

    /// The HTTP request could not be sent or the body could not be read
    #[error("{0}")]
    Transport(String),

    /// The upstream service rejected the request with HTTP 429
    #[error("{service} rate limit exceeded (HTTP 429): {body}")]
    RateLimited {
        /// Upstream service name
        service: String,
        /// Response body
        body: String,
    },

    /// The upstream service answered with a non-success status
    #[error("{service} returned error status {status}: {body}")]
    Status {
        /// Upstream service name
        service: String,
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// The response body did not have the expected shape
    #[error("Failed to parse JSON response from {service}: {message}")]
    Decode {
        /// Upstream service name
        service: String,
        /// Parser error and offending body
        message: String,
    },

    /// The model refused the prompt
    #[error("{service} blocked the prompt: {reason}")]
    Blocked {
        /// Upstream service name
        service: String,
        /// Block reason reported by the provider
        reason: String,
    },

    /// The graph run itself ended in an error
    #[error("Graph run failed: {0}")]
    Graph(String),
}

impl CollaboratorError {
    /// Map a non-success HTTP status to an error
    pub fn from_status(service: &str, status: u16, body: String) -> Self {
        if status == 429 {
            CollaboratorError::RateLimited {
                service: service.to_string(),
                body,
            }
        } else {
            CollaboratorError::Status {
                service: service.to_string(),
                status,
                body,
            }
        }
    }
}
