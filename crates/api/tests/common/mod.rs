#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use atelier_api::config::ServerConfig;
use atelier_api::in_flight::InFlightGenerations;
use atelier_api::middleware::rate_limit::RateLimiter;
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_llm::{GenerationError, GenerationParams, ModelCatalog, SvgGenerator};

/// SVG returned by [`FakeGenerator::returning_default`].
pub const FAKE_SVG: &str = "<svg viewBox=\"0 0 10 10\"><circle cx=\"5\" cy=\"5\" r=\"4\"/></svg>";

/// Nothing listens here, so catalog refreshes fail fast and fall back.
const OFFLINE_BASE_URL: &str = "http://127.0.0.1:9/api/v1";

/// Build a test `ServerConfig` with editing enabled and the default limits.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        editing_enabled: true,
        rate_limit_per_minute: 100,
        openrouter_api_key: None,
        openrouter_base_url: OFFLINE_BASE_URL.to_string(),
        prompt_config_path: "config/prompt.json".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Fake generator
// ---------------------------------------------------------------------------

enum Outcome {
    Svg(String),
    Remote(String),
    Empty,
}

/// Deterministic [`SvgGenerator`] that records every call.
pub struct FakeGenerator {
    outcome: Outcome,
    calls: Mutex<Vec<GenerationParams>>,
}

impl FakeGenerator {
    fn with_outcome(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn returning(svg: &str) -> Arc<Self> {
        Self::with_outcome(Outcome::Svg(svg.to_string()))
    }

    pub fn returning_default() -> Arc<Self> {
        Self::returning(FAKE_SVG)
    }

    /// Every call fails with a provider-reported error carrying `message`.
    pub fn failing(message: &str) -> Arc<Self> {
        Self::with_outcome(Outcome::Remote(message.to_string()))
    }

    /// Every call answers with a completion that has no content.
    pub fn empty() -> Arc<Self> {
        Self::with_outcome(Outcome::Empty)
    }

    pub fn calls(&self) -> Vec<GenerationParams> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SvgGenerator for FakeGenerator {
    async fn generate_svg(&self, params: &GenerationParams) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(params.clone());
        match &self.outcome {
            Outcome::Svg(svg) => Ok(svg.clone()),
            Outcome::Remote(message) => Err(GenerationError::Remote {
                message: message.clone(),
            }),
            Outcome::Empty => Err(GenerationError::EmptyContent),
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build application state around `pool` with the given config and generator.
pub fn test_state(
    pool: SqlitePool,
    config: ServerConfig,
    generator: Arc<dyn SvgGenerator>,
) -> AppState {
    AppState {
        pool,
        rate_limiter: Arc::new(RateLimiter::per_minute(config.rate_limit_per_minute)),
        config: Arc::new(config),
        generator,
        catalog: Arc::new(ModelCatalog::new(OFFLINE_BASE_URL.to_string())),
        in_flight: Arc::new(InFlightGenerations::new()),
    }
}

/// Build the full application router from prepared state.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery,
/// rate limiting).
pub fn build_app(state: AppState) -> Router {
    let config = (*state.config).clone();
    build_app_router(state, &config)
}

/// Full router with editing enabled and a generator that always succeeds.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_app(test_state(
        pool,
        test_config(),
        FakeGenerator::returning_default(),
    ))
}

/// Full router with editing disabled.
pub fn build_readonly_app(pool: SqlitePool) -> Router {
    let config = ServerConfig {
        editing_enabled: false,
        ..test_config()
    };
    build_app(test_state(pool, config, FakeGenerator::returning_default()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn with_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    with_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    with_json(app, Method::PUT, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    with_json(app, Method::PATCH, uri, body).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a group through the API and return its id.
pub async fn create_group(app: Router, title: &str, prompt: &str, category: &str) -> i64 {
    let response = post_json(
        app,
        "/api/groups",
        serde_json::json!({"title": title, "prompt": prompt, "category": category}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Attach an artwork to an existing group through the API and return its id.
pub async fn create_artwork(app: Router, group_id: i64, model: &str) -> i64 {
    let response = post_json(
        app,
        "/api/artworks",
        serde_json::json!({"group_id": group_id, "model": model}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["artwork"]["id"]
        .as_i64()
        .unwrap()
}
