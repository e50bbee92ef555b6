// Common test utilities and helpers

use async_trait::async_trait;
use axum::{
    Json, Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header::AUTHORIZATION},
    routing::post,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::config::{Config, UpstreamFailurePolicy};
use crate::services::CompletionClient;
use crate::services::llm::{LLMError, UpstreamResult};
use crate::{AppState, build_router};

/// Canned behaviour for `StubClient`
#[derive(Debug, Clone)]
pub enum StubOutcome {
    Answer(String),
    Status(u16, String),
    MissingContent,
    Transport,
    Decode,
    NotConfigured,
}

/// Completion client that never touches the network
pub struct StubClient {
    outcome: StubOutcome,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl StubClient {
    pub fn new(outcome: StubOutcome) -> Arc<Self> {
        Arc::new(Self { outcome, calls: Mutex::new(Vec::new()) })
    }

    pub fn recorded_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for StubClient {
    fn is_configured(&self) -> bool {
        !matches!(self.outcome, StubOutcome::NotConfigured)
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    async fn complete(
        &self,
        system_prompt: &str,
        question: &str,
    ) -> Result<UpstreamResult, LLMError> {
        self.calls.lock().unwrap().push((system_prompt.to_string(), question.to_string()));
        match &self.outcome {
            StubOutcome::Answer(text) => Ok(UpstreamResult::answered(200, Some(text.clone()))),
            StubOutcome::Status(status, body) => Ok(UpstreamResult::failed(*status, body.clone())),
            StubOutcome::MissingContent => Ok(UpstreamResult::answered(200, None)),
            StubOutcome::Transport => Err(LLMError::Transport("connection refused".to_string())),
            StubOutcome::Decode => Err(LLMError::Decode("expected value".to_string())),
            StubOutcome::NotConfigured => Err(LLMError::NotConfigured),
        }
    }
}

pub fn test_config(policy: UpstreamFailurePolicy) -> Config {
    let mut config = Config::default();
    config.ask.on_upstream_failure = policy;
    config
}

pub fn router_with(client: Arc<dyn CompletionClient>, policy: UpstreamFailurePolicy) -> Router {
    build_router(Arc::new(AppState::with_client(test_config(policy), client)))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }
}

/// Send a single request through the router
pub async fn send(router: Router, method: Method, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri("/api/ask")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();

    TestResponse { status, headers, body }
}

/// What a fake completion server saw
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub payload: Value,
}

pub struct FakeUpstream {
    pub base_url: String,
    pub captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Start an OpenAI-shaped server on 127.0.0.1 that always replies with `status` and `body`
pub async fn spawn_upstream(status: StatusCode, body: &'static str) -> FakeUpstream {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();

    let app = Router::new().route(
        "/v1/chat/completions",
        post(move |headers: HeaderMap, Json(payload): Json<Value>| {
            let sink = sink.clone();
            async move {
                let authorization =
                    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()).map(str::to_owned);
                sink.lock().unwrap().push(CapturedRequest { authorization, payload });
                (status, body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeUpstream { base_url: format!("http://{}/v1", addr), captured }
}

/// An address nothing listens on
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1", addr)
}
