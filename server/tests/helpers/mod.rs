//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full
//! axum router, plus `StubGithub`, a local stand-in for the GitHub API that
//! records every repository-dispatch call it receives.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{self, Method, Request, Response, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tower::ServiceExt;

use hookrelay_server::api::{create_router, AppState};
use hookrelay_server::config::Config;
use hookrelay_server::webhook::dispatch::Dispatcher;
use hookrelay_server::webhook::signing;

// ============================================================================
// Stub GitHub API
// ============================================================================

/// A repository-dispatch request recorded by the stub GitHub API.
#[derive(Debug, Clone)]
pub struct RecordedDispatch {
    pub owner: String,
    pub repo: String,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedDispatch>>>,
    response_status: StatusCode,
}

/// Stub GitHub API server bound to an ephemeral local port.
///
/// Point `Config.github_api_base` at `base_url` and every dispatch the
/// gateway sends lands in `received()` instead of the real API.
pub struct StubGithub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedDispatch>>>,
}

impl StubGithub {
    /// Spawn a stub that answers dispatch calls with 204 No Content.
    pub async fn spawn() -> Self {
        Self::spawn_with_status(StatusCode::NO_CONTENT).await
    }

    /// Spawn a stub that answers dispatch calls with the given status.
    pub async fn spawn_with_status(status: StatusCode) -> Self {
        let requests: Arc<Mutex<Vec<RecordedDispatch>>> = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            requests: requests.clone(),
            response_status: status,
        };

        let router = Router::new()
            .route("/repos/{owner}/{repo}/dispatches", post(record_dispatch))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let addr = listener
            .local_addr()
            .expect("Stub listener has no local addr");
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Stub server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// Dispatch requests received so far.
    pub async fn received(&self) -> Vec<RecordedDispatch> {
        self.requests.lock().await.clone()
    }
}

async fn record_dispatch(
    State(state): State<StubState>,
    Path((owner, repo)): Path<(String, String)>,
    Json(body): Json<serde_json::Value>,
) -> StatusCode {
    state
        .requests
        .lock()
        .await
        .push(RecordedDispatch { owner, repo, body });
    state.response_status
}

// ============================================================================
// TestApp
// ============================================================================

/// Test application wrapping the gateway router.
pub struct TestApp {
    pub router: Router,
    pub config: Config,
}

impl TestApp {
    /// Build the app with its dispatcher pointed at the given stub.
    pub fn new(github: &StubGithub) -> Self {
        Self::with_config(Config {
            github_api_base: github.base_url.clone(),
            ..Config::default_for_test()
        })
    }

    /// Build the app from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        let dispatcher = Dispatcher::new(&config).expect("Failed to build dispatcher");
        let state = AppState::new(config.clone(), dispatcher);
        Self {
            router: create_router(state),
            config,
        }
    }

    /// Request builder with method and URI set.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }

    /// Build a correctly signed `POST /webhook` request for the given body.
    pub fn signed_webhook(&self, body: &[u8], event_kind: Option<&str>) -> Request<Body> {
        let signature = signing::sign_payload(&self.config.webhook_secret, body);
        let mut builder = Self::request(Method::POST, "/webhook")
            .header("Content-Type", "application/json")
            .header("X-Hub-Signature-256", signature);
        if let Some(kind) = event_kind {
            builder = builder.header("X-GitHub-Event", kind);
        }
        builder
            .body(Body::from(body.to_vec()))
            .expect("request build failed")
    }
}

// ============================================================================
// Body helpers
// ============================================================================

/// Read a response body to completion and parse it as JSON.
pub async fn body_to_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body read failed")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not valid JSON")
}

/// Read a response body to completion as a string.
pub async fn body_to_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body read failed")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is not UTF-8")
}
