//! Route definitions for the page view models.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Page routes, mounted at the root.
///
/// ```text
/// GET /                          -> homepage
/// GET /workshop                  -> workshop (?edit=)
/// GET /gallery                   -> gallery (redirects to first category)
/// GET /gallery/category/{name}   -> gallery_category
/// GET /group/{id}                -> group_page (?model=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::homepage))
        .route("/workshop", get(pages::workshop))
        .route("/gallery", get(pages::gallery))
        .route("/gallery/category/{name}", get(pages::gallery_category))
        .route("/group/{id}", get(pages::group_page))
}
