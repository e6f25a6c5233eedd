//! Handlers for the `/api/artworks` resource.

use atelier_core::artwork::{
    resolve_params, validate_group_text, validate_max_tokens, validate_model,
    validate_temperature,
};
use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::artwork::{Artwork, CreateArtwork};
use atelier_db::models::group::{CreateGroup, Group};
use atelier_db::repositories::{ArtworkRepo, GroupRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::group::ensure_group_exists;
use crate::middleware::editing::RequireEditing;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /api/artworks`.
///
/// Exactly one of `group_id` (attach to an existing group) or `group`
/// (create the group first) must be present.
#[derive(Debug, Deserialize)]
pub struct CreateArtworkRequest {
    pub group_id: Option<DbId>,
    pub group: Option<CreateGroup>,
    pub model: String,
    pub temperature: Option<f64>,
    pub max_tokens: Option<i64>,
    pub svg: Option<String>,
}

/// Body of `PATCH /api/artworks/{id}`. Omitted fields keep their value.
#[derive(Debug, Deserialize)]
pub struct UpdateArtworkRequest {
    pub temperature: Option<f64>,
    pub max_tokens: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ArtworkCreated {
    pub group: Group,
    pub artwork: Artwork,
}

/// Result of deleting one artwork. `group_empty` tells the client the
/// group has no artworks left and the view should be refreshed.
#[derive(Debug, Serialize)]
pub struct ArtworkDeleted {
    pub deleted_id: DbId,
    pub group_id: DbId,
    pub remaining_artworks: i64,
    pub group_empty: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load an artwork or fail with 404.
pub(crate) async fn ensure_artwork_exists(state: &AppState, id: DbId) -> AppResult<Artwork> {
    ArtworkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/artworks
pub async fn create(
    _: RequireEditing,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateArtworkRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ArtworkCreated>>)> {
    validate_model(&input.model)?;
    let (temperature, max_tokens) = resolve_params(input.temperature, input.max_tokens)?;

    let group = match (input.group_id, input.group) {
        (Some(group_id), None) => ensure_group_exists(&state, group_id).await?,
        (None, Some(new_group)) => {
            validate_group_text(&new_group.title, &new_group.prompt)?;
            let group = GroupRepo::create(&state.pool, &new_group).await?;
            tracing::info!(group_id = group.id, title = %group.title, "Group created inline");
            group
        }
        (Some(_), Some(_)) => {
            return Err(AppError::Core(CoreError::Validation(
                "provide either group_id or group, not both".to_string(),
            )));
        }
        (None, None) => {
            return Err(AppError::Core(CoreError::Validation(
                "either group_id or group is required".to_string(),
            )));
        }
    };

    let artwork = ArtworkRepo::create(
        &state.pool,
        &CreateArtwork {
            group_id: group.id,
            model: input.model,
            temperature,
            max_tokens,
            svg: input.svg,
        },
    )
    .await?;

    tracing::info!(
        artwork_id = artwork.id,
        group_id = group.id,
        model = %artwork.model,
        "Artwork created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ArtworkCreated { group, artwork },
        }),
    ))
}

/// GET /api/artworks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Artwork>>> {
    let artwork = ensure_artwork_exists(&state, id).await?;
    Ok(Json(DataResponse { data: artwork }))
}

/// PATCH /api/artworks/{id}
///
/// Changes generation parameters only; the stored SVG is untouched until
/// the next generation.
pub async fn update_params(
    _: RequireEditing,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateArtworkRequest>,
) -> AppResult<Json<DataResponse<Artwork>>> {
    let current = ensure_artwork_exists(&state, id).await?;

    let temperature = input.temperature.unwrap_or(current.temperature);
    let max_tokens = input.max_tokens.unwrap_or(current.max_tokens);
    validate_temperature(temperature)?;
    validate_max_tokens(max_tokens)?;

    let artwork = ArtworkRepo::update_params(&state.pool, id, temperature, max_tokens)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;

    tracing::info!(artwork_id = id, temperature, max_tokens, "Artwork parameters updated");
    Ok(Json(DataResponse { data: artwork }))
}

/// DELETE /api/artworks/{id}
///
/// The owning group is kept even when this was its last artwork.
pub async fn delete(
    _: RequireEditing,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ArtworkDeleted>>> {
    let artwork = ensure_artwork_exists(&state, id).await?;

    if !ArtworkRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }));
    }

    let remaining = ArtworkRepo::count_by_group(&state.pool, artwork.group_id).await?;
    tracing::info!(
        artwork_id = id,
        group_id = artwork.group_id,
        remaining,
        "Artwork deleted"
    );

    Ok(Json(DataResponse {
        data: ArtworkDeleted {
            deleted_id: id,
            group_id: artwork.group_id,
            remaining_artworks: remaining,
            group_empty: remaining == 0,
        },
    }))
}
