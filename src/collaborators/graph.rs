//! Research graph client
//!
//! Runs a compiled graph on a LangGraph-compatible server with a blocking
//! `POST /runs/wait` call. The server answers with the final graph state,
//! which is decoded into the caller's state type.

use super::http::send_json;
use super::{AgentGraph, CollaboratorError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

const GRAPH_SERVICE: &str = "LangGraph server";

/// Key the server uses to report a run that ended in an exception
const RUN_ERROR_KEY: &str = "__error__";

#[derive(Serialize)]
struct RunRequest<'a, I> {
    assistant_id: &'a str,
    input: &'a I,
}

/// A graph hosted on a LangGraph-compatible server
///
/// `I` is the input state sent to the graph and `O` the final state read back.
pub struct RemoteGraph<I, O> {
    client: reqwest::Client,
    base_url: String,
    assistant_id: String,
    _state: PhantomData<fn(I) -> O>,
}

impl<I, O> RemoteGraph<I, O> {
    /// Create a client for `assistant_id` on the server at `base_url`
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        assistant_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            assistant_id: assistant_id.into(),
            _state: PhantomData,
        }
    }

    fn runs_url(&self) -> String {
        format!("{}/runs/wait", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl<I, O> AgentGraph<I, O> for RemoteGraph<I, O>
where
    I: Serialize + Send + Sync + 'static,
    O: DeserializeOwned + Send + 'static,
{
    async fn invoke(&self, input: I) -> Result<O, CollaboratorError> {
        let url = self.runs_url();
        tracing::debug!(
            url = %url,
            assistant_id = %self.assistant_id,
            "Running graph"
        );

        let body = RunRequest {
            assistant_id: &self.assistant_id,
            input: &input,
        };
        let state: Value = send_json(GRAPH_SERVICE, self.client.post(&url).json(&body)).await?;

        if let Some(error) = state.get(RUN_ERROR_KEY) {
            return Err(CollaboratorError::Graph(describe_run_error(error)));
        }

        serde_json::from_value(state).map_err(|e| CollaboratorError::Decode {
            service: GRAPH_SERVICE.to_string(),
            message: e.to_string(),
        })
    }
}

fn describe_run_error(error: &Value) -> String {
    let kind = error.get("error").and_then(Value::as_str);
    let message = error.get("message").and_then(Value::as_str);
    match (kind, message) {
        (Some(kind), Some(message)) => format!("{}: {}", kind, message),
        (None, Some(message)) => message.to_string(),
        _ => error.to_string(),
    }
}
