//! Integration tests for the research endpoint
//!
//! These tests drive the full router (extractors, CORS, error mapping) with
//! in-process collaborators standing in for the chat model and the graphs.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use deep_research_api::api;
use deep_research_api::collaborators::{AgentGraph, ChatModel, ChatRequest, CollaboratorError};
use deep_research_api::research::{
    AgentInputState, AgentState, ChatCompletion, ResearchDispatcher, ResearcherInput,
    ResearcherState,
};
use deep_research_api::state::AppContext;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Default)]
struct FakeChat {
    calls: AtomicUsize,
    content: String,
}

#[async_trait]
impl ChatModel for FakeChat {
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(request.messages.len(), 1);
        Ok(ChatCompletion {
            content: self.content.clone(),
        })
    }
}

#[derive(Default)]
struct FakeResearcher {
    calls: AtomicUsize,
}

#[async_trait]
impl AgentGraph<ResearcherInput, ResearcherState> for FakeResearcher {
    async fn invoke(&self, input: ResearcherInput) -> Result<ResearcherState, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ResearcherState {
            compressed_research: Some(format!("notes on {}", input.research_topic)),
        })
    }
}

#[derive(Default)]
struct FakeFullGraph {
    calls: AtomicUsize,
    failure: Option<String>,
}

#[async_trait]
impl AgentGraph<AgentInputState, AgentState> for FakeFullGraph {
    async fn invoke(&self, input: AgentInputState) -> Result<AgentState, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(CollaboratorError::Graph(message.clone()));
        }
        Ok(AgentState {
            final_report: Some(format!("report for {}", input.messages[0].content)),
        })
    }
}

struct TestApp {
    router: Router,
    chat: Arc<FakeChat>,
    researcher: Arc<FakeResearcher>,
    full: Arc<FakeFullGraph>,
}

impl TestApp {
    fn new(chat: FakeChat, full: FakeFullGraph) -> Self {
        let chat = Arc::new(chat);
        let researcher = Arc::new(FakeResearcher::default());
        let full = Arc::new(full);

        let dispatcher = ResearchDispatcher::new(
            chat.clone(),
            researcher.clone(),
            full.clone(),
            "google_genai",
            "gemini-2.5-pro",
        );
        let context = AppContext::new(dispatcher).shared();

        Self {
            router: api::router(context),
            chat,
            researcher,
            full,
        }
    }

    fn standard() -> Self {
        Self::new(
            FakeChat {
                content: "Quantum annealing is...".to_string(),
                ..Default::default()
            },
            FakeFullGraph::default(),
        )
    }

    fn calls(&self) -> (usize, usize, usize) {
        (
            self.chat.calls.load(Ordering::SeqCst),
            self.researcher.calls.load(Ordering::SeqCst),
            self.full.calls.load(Ordering::SeqCst),
        )
    }

    async fn post_research(&self, body: Value) -> (StatusCode, Value) {
        self.post_raw(body.to_string()).await
    }

    async fn post_raw(&self, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/research")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

#[tokio::test]
async fn test_llm_only_example() {
    let app = TestApp::standard();
    let (status, body) = app
        .post_research(json!({"question": "What is quantum annealing?", "mode": "llm_only"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "mode": "llm_only",
            "question": "What is quantum annealing?",
            "final_report": "Quantum annealing is..."
        })
    );
    assert_eq!(app.calls(), (1, 0, 0));
}

#[tokio::test]
async fn test_blank_question_is_bad_request() {
    let app = TestApp::standard();
    let (status, body) = app
        .post_research(json!({"question": "  ", "mode": "deep_web"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Question must not be empty.");
    assert_eq!(app.calls(), (0, 0, 0));
}

#[tokio::test]
async fn test_mode_defaults_to_deep_web() {
    let app = TestApp::standard();
    let (status, body) = app
        .post_research(json!({"question": "History of the transistor"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "deep_web");
    assert_eq!(body["final_report"], "report for History of the transistor");
    assert_eq!(app.calls(), (0, 0, 1));
}

#[tokio::test]
async fn test_quick_mode_uses_researcher() {
    let app = TestApp::standard();
    let (status, body) = app
        .post_research(json!({"question": "Rust borrow checker", "mode": "quick", "template": "brief"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "quick");
    assert_eq!(body["final_report"], "notes on Rust borrow checker");
    assert_eq!(app.calls(), (0, 1, 0));
}

#[tokio::test]
async fn test_deep_web_and_local_uses_full_graph() {
    let app = TestApp::standard();
    let (status, body) = app
        .post_research(json!({"question": "Local docs", "mode": "deep_web_and_local"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "deep_web_and_local");
    assert_eq!(app.calls(), (0, 0, 1));
}

#[tokio::test]
async fn test_empty_completion_gets_placeholder() {
    let app = TestApp::new(FakeChat::default(), FakeFullGraph::default());
    let (status, body) = app
        .post_research(json!({"question": "q", "mode": "llm_only"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["final_report"], "No report generated.");
}

#[tokio::test]
async fn test_collaborator_failure_is_server_error() {
    let app = TestApp::new(
        FakeChat::default(),
        FakeFullGraph {
            failure: Some("supervisor crashed".to_string()),
            ..Default::default()
        },
    );
    let (status, body) = app
        .post_research(json!({"question": "q", "mode": "deep_web"}))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Research failed: "));
    assert!(detail.contains("supervisor crashed"));
    assert!(body.get("final_report").is_none());
    assert_eq!(app.calls(), (0, 0, 1));
}

#[tokio::test]
async fn test_unknown_mode_rejected_before_dispatch() {
    let app = TestApp::standard();
    let (status, body) = app
        .post_research(json!({"question": "q", "mode": "shallow"}))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);
    assert!(body["detail"].as_str().unwrap().contains("mode"));
    assert_eq!(app.calls(), (0, 0, 0));
}

#[tokio::test]
async fn test_malformed_json_gets_detail_body() {
    let app = TestApp::standard();
    let (status, body) = app.post_raw(r#"{"question": "q", "mode": "#.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(!body["detail"].as_str().unwrap().is_empty());
    assert_eq!(app.calls(), (0, 0, 0));
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let app = TestApp::standard();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/research")
        .header(header::ORIGIN, "http://localhost:5500")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|h| h.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::standard();
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
}
