//! Handler for the model catalog.

use atelier_core::catalog::ModelInfo;
use axum::extract::State;
use axum::Json;

use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/models
///
/// Never fails: a provider outage degrades to the cached or built-in list.
pub async fn list_models(State(state): State<AppState>) -> Json<DataResponse<Vec<ModelInfo>>> {
    let models = state.catalog.models().await;
    Json(DataResponse { data: models })
}
