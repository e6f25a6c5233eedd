pub mod artworks;
pub mod groups;
pub mod health;
pub mod pages;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{catalog, generation, group};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /models                          GET model catalog
/// /categories                      GET distinct categories
/// /generate                        POST generate (artwork or direct)
///
/// /groups                          list, create
/// /groups/{id}                     get (with artworks), update, delete
///
/// /artworks                        create (existing or inline group)
/// /artworks/{id}                   get, patch params, delete
/// /artworks/{id}/generate          generate and store SVG (POST)
/// ```
///
/// Mutating routes require editing to be enabled and are rate limited
/// per client (see `router::build_app_router`).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/models", get(catalog::list_models))
        .route("/categories", get(group::categories))
        .route("/generate", post(generation::generate))
        .nest("/groups", groups::router())
        .nest("/artworks", artworks::router())
}
