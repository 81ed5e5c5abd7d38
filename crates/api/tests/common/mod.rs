use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use wildtale_api::config::ServerConfig;
use wildtale_api::router::build_app_router;
use wildtale_api::state::AppState;
use wildtale_api::ws::WsManager;
use wildtale_openai::OpenAiClient;
use wildtale_pipeline::{JobRegistry, Pipeline, PipelineConfig};
use wildtale_store::{OutputLayout, StoryStore};

/// Build a test `ServerConfig` rooted at the given output directory.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(output_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        output_dir: output_dir.to_path_buf(),
    }
}

/// Everything a test needs to drive the API against a temp output root.
///
/// Keep the `TestApp` alive for the duration of the test; dropping it
/// deletes the temp directory.
pub struct TestApp {
    pub router: Router,
    pub store: StoryStore,
    pub pipeline: Arc<Pipeline>,
    _output_root: tempfile::TempDir,
}

/// Build the full application router with all middleware layers over a
/// fresh temporary output directory.
///
/// This goes through [`build_app_router`] so integration tests exercise
/// the same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses. The OpenAI client points at an
/// unroutable address; tests that would hit the network assert on the
/// failure path instead.
pub async fn build_test_app() -> TestApp {
    let output_root = tempfile::tempdir().expect("create temp output root");
    let config = test_config(output_root.path());

    let layout = OutputLayout::new(config.output_dir.clone());
    layout.ensure().await.expect("create output directories");
    let store = StoryStore::new(layout);

    let openai = Arc::new(OpenAiClient::new(
        "sk-test".into(),
        "http://127.0.0.1:9".into(),
    ));
    let event_bus = Arc::new(wildtale_events::EventBus::default());
    let ws_manager = Arc::new(WsManager::new());
    let jobs = Arc::new(JobRegistry::new());
    let pipeline = Arc::new(Pipeline::new(
        openai,
        store.clone(),
        Arc::clone(&event_bus),
        jobs,
        PipelineConfig::default(),
    ));

    let state = AppState {
        store: store.clone(),
        config: Arc::new(config.clone()),
        ws_manager,
        pipeline: Arc::clone(&pipeline),
        event_bus,
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        pipeline,
        _output_root: output_root,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    app.oneshot(request).await.expect("send request")
}

/// Issue a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    app.oneshot(request).await.expect("send request")
}

/// Issue a DELETE request against the app.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    app.oneshot(request).await.expect("send request")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse body as JSON")
}

/// Assert the response is an error with the given status and code field.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code);
    assert!(json["error"].is_string());
}
