//! Route definitions for the `/groups` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::group;
use crate::state::AppState;

/// Routes mounted at `/api/groups`.
///
/// ```text
/// GET    /                -> list (?category=)
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(group::list).post(group::create))
        .route(
            "/{id}",
            get(group::get_by_id)
                .put(group::update)
                .delete(group::delete),
        )
}
