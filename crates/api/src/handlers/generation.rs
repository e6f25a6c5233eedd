//! SVG generation endpoints.
//!
//! Generation for a stored artwork reads the artwork's model and
//! parameters plus its group's prompt, calls the generator, and only
//! writes the result on success. A failed call leaves the stored SVG as
//! it was.

use atelier_core::artwork::{resolve_params, validate_model, validate_prompt};
use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::artwork::Artwork;
use atelier_db::repositories::ArtworkRepo;
use atelier_llm::{GenerationParams, Reasoning};
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::artwork::ensure_artwork_exists;
use crate::handlers::group::ensure_group_exists;
use crate::middleware::editing::RequireEditing;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /api/generate`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GenerateRequest {
    /// Regenerate a stored artwork.
    Artwork { artwork_id: DbId },
    /// One-off generation; nothing is persisted.
    Direct {
        prompt: String,
        model: String,
        temperature: Option<f64>,
        max_tokens: Option<i64>,
        reasoning: Option<Reasoning>,
    },
}

#[derive(Debug, Serialize)]
pub struct GeneratedSvg {
    pub svg: String,
}

/// Run one generation for a stored artwork and persist the result.
///
/// Fails with 409 if a generation for the same artwork is already running.
pub async fn generate_for_artwork(state: &AppState, artwork_id: DbId) -> AppResult<Artwork> {
    let artwork = ensure_artwork_exists(state, artwork_id).await?;
    let group = ensure_group_exists(state, artwork.group_id).await?;

    let _guard = state.in_flight.try_acquire(artwork_id).ok_or_else(|| {
        AppError::Core(CoreError::Conflict(format!(
            "A generation for artwork {artwork_id} is already in progress"
        )))
    })?;

    tracing::info!(
        artwork_id,
        group_id = group.id,
        model = %artwork.model,
        "Generating artwork"
    );

    let params = GenerationParams {
        prompt: group.prompt,
        model: artwork.model,
        temperature: artwork.temperature,
        max_tokens: artwork.max_tokens,
        reasoning: None,
    };
    let svg = state.generator.generate_svg(&params).await?;

    let saved = ArtworkRepo::save_svg(&state.pool, artwork_id, &svg)
        .await?
        // Deleted while the generation was running.
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id: artwork_id,
        }))?;

    tracing::info!(artwork_id, chars = saved.svg.len(), "Artwork SVG saved");
    Ok(saved)
}

/// POST /api/artworks/{id}/generate
pub async fn generate_artwork(
    _: RequireEditing,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Artwork>>> {
    let artwork = generate_for_artwork(&state, id).await?;
    Ok(Json(DataResponse { data: artwork }))
}

/// POST /api/generate
///
/// `{artwork_id}` regenerates and returns the stored artwork; the direct
/// form returns `{svg}` without touching storage.
pub async fn generate(
    _: RequireEditing,
    State(state): State<AppState>,
    AppJson(input): AppJson<GenerateRequest>,
) -> AppResult<Response> {
    match input {
        GenerateRequest::Artwork { artwork_id } => {
            let artwork = generate_for_artwork(&state, artwork_id).await?;
            Ok(Json(DataResponse { data: artwork }).into_response())
        }
        GenerateRequest::Direct {
            prompt,
            model,
            temperature,
            max_tokens,
            reasoning,
        } => {
            validate_prompt(&prompt)?;
            validate_model(&model)?;
            let (temperature, max_tokens) = resolve_params(temperature, max_tokens)?;

            let params = GenerationParams {
                prompt: prompt.trim().to_string(),
                model,
                temperature,
                max_tokens,
                reasoning,
            };
            let svg = state.generator.generate_svg(&params).await?;
            Ok(Json(DataResponse {
                data: GeneratedSvg { svg },
            })
            .into_response())
        }
    }
}
