//! Integration tests for the page view models and the model catalog.

mod common;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use common::{body_json, create_artwork, create_group, get};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Homepage
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_homepage_without_featured_group(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let group_id = create_group(app.clone(), "Solo", "p", "Art").await;
    create_artwork(app.clone(), group_id, "anthropic/claude-sonnet-4").await;

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["featured"].is_null());
    assert_eq!(json["data"]["categories"], serde_json::json!(["Art"]));
    assert_eq!(json["data"]["editing_enabled"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_homepage_features_group_with_both_models(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let group_id = create_group(app.clone(), "Versus", "a red fox", "Animals").await;
    create_artwork(app.clone(), group_id, "openai/gpt-5").await;
    create_artwork(app.clone(), group_id, "anthropic/claude-sonnet-4").await;
    create_artwork(app.clone(), group_id, "mistralai/mistral-large").await;

    let json = body_json(get(app, "/").await).await;
    let featured = &json["data"]["featured"];
    assert_eq!(featured["id"], group_id);
    assert_eq!(featured["title"], "Versus");

    let artworks = featured["artworks"].as_array().unwrap();
    assert_eq!(artworks.len(), 2);
    assert_eq!(artworks[0]["model"], "anthropic/claude-sonnet-4");
    assert_eq!(artworks[0]["model_name"], "Anthropic: Claude Sonnet 4");
    assert_eq!(artworks[1]["model"], "openai/gpt-5");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_homepage_falls_back_to_provider_pair(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let group_id = create_group(app.clone(), "Older", "p", "").await;
    create_artwork(app.clone(), group_id, "openai/gpt-4o").await;
    create_artwork(app.clone(), group_id, "anthropic/claude-3.5-sonnet").await;

    let json = body_json(get(app, "/").await).await;
    assert_eq!(json["data"]["featured"]["id"], group_id);
}

// ---------------------------------------------------------------------------
// Workshop
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_workshop_redirects_when_editing_disabled(pool: SqlitePool) {
    let app = common::build_readonly_app(pool);
    let response = get(app, "/workshop").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "/");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_workshop_defaults(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/workshop").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["default_temperature"], 0.7);
    assert_eq!(json["data"]["default_max_tokens"], 50000);
    assert!(json["data"]["edit_group"].is_null());
    assert!(!json["data"]["models"].as_array().unwrap().is_empty());
    assert!(!json["data"]["default_models"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_workshop_loads_group_for_editing(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let group_id = create_group(app.clone(), "Draft", "a teapot", "").await;
    create_artwork(app.clone(), group_id, "openai/gpt-5").await;

    let json = body_json(get(app.clone(), &format!("/workshop?edit={group_id}")).await).await;
    let edit_group = &json["data"]["edit_group"];
    assert_eq!(edit_group["id"], group_id);
    assert_eq!(edit_group["prompt"], "a teapot");
    assert_eq!(edit_group["artworks"][0]["model_name"], "OpenAI: GPT-5");

    let response = get(app, "/workshop?edit=9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gallery_redirects_to_first_category(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    create_group(app.clone(), "B", "p", "Space & Stars").await;
    create_group(app.clone(), "A", "p", "Art").await;

    let response = get(app, "/gallery").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "/gallery/category/Art");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gallery_without_categories_renders(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    create_group(app.clone(), "Uncategorised", "p", "").await;

    let response = get(app, "/gallery").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["category"].is_null());
    assert_eq!(json["data"]["groups"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gallery_category_shows_only_gallery_models(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let in_category = create_group(app.clone(), "Owl", "an owl", "Animals").await;
    create_artwork(app.clone(), in_category, "google/gemini-2.5-pro").await;
    create_artwork(app.clone(), in_category, "meta-llama/llama-3.3-70b-instruct").await;
    let elsewhere = create_group(app.clone(), "Vase", "a vase", "Still Life").await;
    create_artwork(app.clone(), elsewhere, "openai/gpt-5").await;

    let response = get(app, "/gallery/category/Animals").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["category"], "Animals");
    assert_eq!(
        json["data"]["categories"],
        serde_json::json!(["Animals", "Still Life"])
    );

    let groups = json["data"]["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["id"], in_category);
    let artworks = groups[0]["artworks"].as_array().unwrap();
    assert_eq!(artworks.len(), 1);
    assert_eq!(artworks[0]["model"], "google/gemini-2.5-pro");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gallery_category_accepts_encoded_names(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    create_group(app.clone(), "Nebula", "p", "Space & Stars").await;

    let response = get(app, "/gallery/category/Space%20%26%20Stars").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["category"], "Space & Stars");
    assert_eq!(json["data"]["groups"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Single group
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_page_filters_by_provider(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let group_id = create_group(app.clone(), "Mixed", "p", "").await;
    create_artwork(app.clone(), group_id, "openai/gpt-5").await;
    create_artwork(app.clone(), group_id, "anthropic/claude-sonnet-4").await;
    create_artwork(app.clone(), group_id, "deepseek/deepseek-chat-v3.1").await;

    let json = body_json(get(app.clone(), &format!("/group/{group_id}")).await).await;
    assert_eq!(json["data"]["group"]["artworks"].as_array().unwrap().len(), 3);
    assert!(json["data"]["model_filters"].as_array().unwrap().is_empty());

    let json = body_json(get(app.clone(), &format!("/group/{group_id}?model=openai")).await).await;
    let artworks = json["data"]["group"]["artworks"].as_array().unwrap();
    assert_eq!(artworks.len(), 1);
    assert_eq!(artworks[0]["model"], "openai/gpt-5");
    assert_eq!(json["data"]["model_filters"], serde_json::json!(["openai"]));

    let json = body_json(
        get(
            app.clone(),
            &format!("/group/{group_id}?model=anthropic&model=other"),
        )
        .await,
    )
    .await;
    let models: Vec<&str> = json["data"]["group"]["artworks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["model"].as_str().unwrap())
        .collect();
    assert_eq!(
        models,
        vec!["anthropic/claude-sonnet-4", "deepseek/deepseek-chat-v3.1"]
    );

    let response = get(app, &format!("/group/{group_id}?model=mistral")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_page_unknown_group_returns_404(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/group/4242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Model catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_models_fall_back_when_provider_unreachable(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/models").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ids: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"openai/gpt-5"));
    assert!(ids.contains(&"anthropic/claude-sonnet-4"));
}
