//! Integration tests for per-client limiting of mutating requests.

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use common::{body_json, get, send, FakeGenerator};
use sqlx::SqlitePool;

use atelier_api::config::ServerConfig;

fn limited_app(pool: SqlitePool, limit: usize) -> Router {
    let config = ServerConfig {
        rate_limit_per_minute: limit,
        ..common::test_config()
    };
    common::build_app(common::test_state(
        pool,
        config,
        FakeGenerator::returning_default(),
    ))
}

async fn create_group_from(app: Router, client: &str, title: &str) -> axum::response::Response {
    let body = serde_json::json!({"title": title, "prompt": "p"});
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/groups")
        .header(CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", client)
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_default_limit_admits_one_hundred_mutations(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    for i in 0..100 {
        let response = create_group_from(app.clone(), "203.0.113.7", &format!("g{i}")).await;
        assert_eq!(response.status(), StatusCode::CREATED, "request {i}");
    }

    let response = create_group_from(app, "203.0.113.7", "one too many").await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(response).await;
    assert_eq!(json["code"], "RATE_LIMITED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejected_mutation_is_not_applied(pool: SqlitePool) {
    let app = limited_app(pool, 1);

    let response = create_group_from(app.clone(), "198.51.100.1", "kept").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = create_group_from(app.clone(), "198.51.100.1", "dropped").await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let json = body_json(get(app, "/api/groups").await).await;
    let groups = json["data"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["title"], "kept");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reads_are_not_limited(pool: SqlitePool) {
    let app = limited_app(pool, 1);

    let response = create_group_from(app.clone(), "unknown", "g").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    for _ in 0..5 {
        let response = get(app.clone(), "/api/groups").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clients_are_limited_independently(pool: SqlitePool) {
    let app = limited_app(pool, 2);

    for title in ["a", "b"] {
        let response = create_group_from(app.clone(), "192.0.2.1", title).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    let response = create_group_from(app.clone(), "192.0.2.1", "c").await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // Only the first X-Forwarded-For entry identifies the client.
    let response = create_group_from(app.clone(), "192.0.2.2, 192.0.2.1", "d").await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_forbidden_mutations_still_count(pool: SqlitePool) {
    let config = ServerConfig {
        rate_limit_per_minute: 1,
        editing_enabled: false,
        ..common::test_config()
    };
    let app = common::build_app(common::test_state(
        pool,
        config,
        FakeGenerator::returning_default(),
    ));

    let response = create_group_from(app.clone(), "192.0.2.9", "g").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = create_group_from(app, "192.0.2.9", "g").await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}
