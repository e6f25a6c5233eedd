//! Route definitions for the `/artworks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{artwork, generation};
use crate::state::AppState;

/// Routes mounted at `/api/artworks`.
///
/// ```text
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PATCH  /{id}            -> update_params
/// DELETE /{id}            -> delete
/// POST   /{id}/generate   -> generate_artwork
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(artwork::create))
        .route(
            "/{id}",
            get(artwork::get_by_id)
                .patch(artwork::update_params)
                .delete(artwork::delete),
        )
        .route("/{id}/generate", post(generation::generate_artwork))
}
