//! Handlers for the `/api/groups` resource.

use atelier_core::artwork::validate_group_text;
use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::group::{CreateGroup, Group, GroupWithArtworks, UpdateGroup};
use atelier_db::repositories::{ArtworkRepo, GroupRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::editing::RequireEditing;
use crate::query::CategoryParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a group or fail with 404.
pub(crate) async fn ensure_group_exists(state: &AppState, id: DbId) -> AppResult<Group> {
    GroupRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Group",
            id,
        }))
}

/// GET /api/groups?category=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CategoryParams>,
) -> AppResult<Json<DataResponse<Vec<Group>>>> {
    let groups = GroupRepo::list(&state.pool, params.category.as_deref()).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// POST /api/groups
pub async fn create(
    _: RequireEditing,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateGroup>,
) -> AppResult<(StatusCode, Json<DataResponse<Group>>)> {
    validate_group_text(&input.title, &input.prompt)?;
    let group = GroupRepo::create(&state.pool, &input).await?;
    tracing::info!(group_id = group.id, title = %group.title, "Group created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: group })))
}

/// GET /api/groups/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<GroupWithArtworks>>> {
    let group = ensure_group_exists(&state, id).await?;
    let artworks = ArtworkRepo::list_by_group(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: GroupWithArtworks { group, artworks },
    }))
}

/// PUT /api/groups/{id}
pub async fn update(
    _: RequireEditing,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateGroup>,
) -> AppResult<Json<DataResponse<Group>>> {
    validate_group_text(&input.title, &input.prompt)?;
    let group = GroupRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Group",
            id,
        }))?;
    tracing::info!(group_id = id, "Group updated");
    Ok(Json(DataResponse { data: group }))
}

/// DELETE /api/groups/{id}
///
/// Removes the group and, through the foreign-key cascade, its artworks.
pub async fn delete(
    _: RequireEditing,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let deleted = GroupRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(group_id = id, "Group deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Group",
            id,
        }))
    }
}

/// GET /api/categories
pub async fn categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let categories = GroupRepo::distinct_categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}
