//! Error types and error handling for the application
//!
//! Request-time failures are represented by [`AppError`], which converts into
//! an HTTP response. Start-up failures are represented by [`BootstrapError`]
//! and end the process with a non-zero exit code.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

use crate::collaborators::CollaboratorError;

/// Detail message returned when the question is blank
pub const EMPTY_QUESTION_DETAIL: &str = "Question must not be empty.";

/// Errors surfaced by the research endpoint
///
/// Each variant maps to exactly one HTTP status. There is no partial-success
/// variant: a request either produces a full report or one of these.
#[derive(Error, Debug)]
pub enum AppError {
    /// The client supplied an unusable request (blank question)
    #[error("{0}")]
    InvalidInput(String),

    /// A collaborator (chat model or research graph) failed
    #[error("Research failed: {0}")]
    PipelineFailure(String),

    /// The body was not valid JSON for the endpoint (bad syntax, unknown mode, ...)
    #[error("{}", .0.body_text())]
    MalformedBody(#[from] JsonRejection),
}

impl AppError {
    /// Rejection for a blank or whitespace-only question
    pub fn empty_question() -> Self {
        AppError::InvalidInput(EMPTY_QUESTION_DETAIL.to_string())
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::PipelineFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MalformedBody(rejection) => rejection.status(),
        }
    }
}

impl From<CollaboratorError> for AppError {
    fn from(err: CollaboratorError) -> Self {
        AppError::PipelineFailure(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "detail": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

/// Errors that prevent the server from starting
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// The configuration file passed on the command line does not exist
    #[error("Could not find config file at {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The configuration file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::FileConfig`]
    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        /// Path that was parsed
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// A configuration value failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Host and port do not resolve to a socket address
    #[error("Invalid server address: {0}")]
    InvalidAddress(String),

    /// The listener could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address we tried to bind
        addr: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl BootstrapError {
    /// Process exit code for a failed start
    pub fn exit_code(&self) -> u8 {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let err = AppError::empty_question();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Question must not be empty.");
    }

    #[test]
    fn test_collaborator_error_becomes_pipeline_failure() {
        let err: AppError = CollaboratorError::Transport("connection refused".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let message = err.to_string();
        assert!(message.starts_with("Research failed: "));
        assert!(message.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_error_body_carries_detail_and_status() {
        let response = AppError::PipelineFailure("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "Research failed: boom");
        assert_eq!(body["status"], 500);
    }

    #[test]
    fn test_bootstrap_errors_exit_with_two() {
        let err = BootstrapError::ConfigNotFound(PathBuf::from("/nope/research.toml"));
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("/nope/research.toml"));
    }
}
