//! Editing gate extractor.
//!
//! Every mutating handler takes [`RequireEditing`] as its first argument,
//! so the check runs before the body is parsed or storage is touched.

use atelier_core::error::CoreError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Message returned when editing is switched off.
pub const EDITING_DISABLED: &str = "Artwork editing is currently disabled";

/// Requires `ENABLE_EDITING`. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn create(_: RequireEditing, State(state): State<AppState>) -> AppResult<StatusCode> {
///     // editing is guaranteed to be enabled here
///     Ok(StatusCode::CREATED)
/// }
/// ```
pub struct RequireEditing;

impl FromRequestParts<AppState> for RequireEditing {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !state.config.editing_enabled {
            tracing::info!(
                method = %parts.method,
                path = %parts.uri.path(),
                "Mutation rejected: editing is disabled"
            );
            return Err(AppError::Core(CoreError::Forbidden(
                EDITING_DISABLED.into(),
            )));
        }
        Ok(RequireEditing)
    }
}
