//! View-model endpoints for the homepage, workshop, gallery and
//! single-group pages.
//!
//! Each returns the JSON a page template would render from. Artworks are
//! decorated with the catalog's display name for their model.

use atelier_core::artwork::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use atelier_core::catalog::{default_model_ids, display_name, ModelInfo};
use atelier_core::gallery::{
    category_path, is_gallery_model, matches_any, FALLBACK_FEATURED_PAIR, FEATURED_PAIR,
};
use atelier_core::types::DbId;
use atelier_db::models::artwork::Artwork;
use atelier_db::models::group::Group;
use atelier_db::repositories::{ArtworkRepo, GroupRepo};
use axum::extract::{RawQuery, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::{AppPath, AppQuery};
use crate::handlers::group::ensure_group_exists;
use crate::query::{parse_model_filters, WorkshopParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ArtworkView {
    #[serde(flatten)]
    pub artwork: Artwork,
    pub model_name: String,
}

#[derive(Debug, Serialize)]
pub struct GroupView {
    #[serde(flatten)]
    pub group: Group,
    pub artworks: Vec<ArtworkView>,
}

#[derive(Debug, Serialize)]
pub struct HomepageView {
    /// A random group drawn by both featured models, if any exists.
    pub featured: Option<GroupView>,
    pub categories: Vec<String>,
    pub editing_enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct WorkshopView {
    pub models: Vec<ModelInfo>,
    pub default_models: Vec<String>,
    pub default_temperature: f64,
    pub default_max_tokens: i64,
    /// The group loaded by `?edit=`.
    pub edit_group: Option<GroupView>,
}

#[derive(Debug, Serialize)]
pub struct GalleryView {
    pub category: Option<String>,
    pub categories: Vec<String>,
    pub groups: Vec<GroupView>,
    pub editing_enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct GroupPageView {
    pub group: GroupView,
    pub model_filters: Vec<&'static str>,
    pub editing_enabled: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn group_view(models: &[ModelInfo], group: Group, artworks: Vec<Artwork>) -> GroupView {
    let artworks = artworks
        .into_iter()
        .map(|artwork| ArtworkView {
            model_name: display_name(models, &artwork.model).to_string(),
            artwork,
        })
        .collect();
    GroupView { group, artworks }
}

/// `302 Found` to `location`.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Groups (optionally in one category) with only their gallery-model artworks.
async fn gallery_groups(state: &AppState, category: Option<&str>) -> AppResult<Vec<GroupView>> {
    let batch = GroupRepo::list_with_artworks(&state.pool, category).await?;
    let models = state.catalog.models().await;

    let mut artworks_by_group = batch.artworks_by_group;
    let views = batch
        .groups
        .into_iter()
        .map(|group| {
            let artworks: Vec<Artwork> = artworks_by_group
                .remove(&group.id)
                .unwrap_or_default()
                .into_iter()
                .filter(|a| is_gallery_model(&a.model))
                .collect();
            group_view(&models, group, artworks)
        })
        .collect();
    Ok(views)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn homepage(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<HomepageView>>> {
    let mut featured =
        GroupRepo::random_with_models(&state.pool, FEATURED_PAIR.0, FEATURED_PAIR.1).await?;
    if featured.is_none() {
        tracing::debug!("No group with the featured pair, trying the provider fallback");
        featured = GroupRepo::random_with_models(
            &state.pool,
            FALLBACK_FEATURED_PAIR.0,
            FALLBACK_FEATURED_PAIR.1,
        )
        .await?;
    }

    let featured = match featured {
        Some((group, artworks)) => {
            let models = state.catalog.models().await;
            Some(group_view(&models, group, artworks))
        }
        None => None,
    };

    let categories = GroupRepo::distinct_categories(&state.pool).await?;

    Ok(Json(DataResponse {
        data: HomepageView {
            featured,
            categories,
            editing_enabled: state.config.editing_enabled,
        },
    }))
}

/// GET /workshop?edit={id}
///
/// Redirects to `/` when editing is disabled.
pub async fn workshop(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<WorkshopParams>,
) -> AppResult<Response> {
    if !state.config.editing_enabled {
        tracing::info!("Workshop access denied: editing is disabled");
        return Ok(found("/"));
    }

    let models = state.catalog.models().await;

    let edit_group = match params.edit {
        Some(id) => {
            let group = ensure_group_exists(&state, id).await?;
            let artworks = ArtworkRepo::list_by_group(&state.pool, id).await?;
            tracing::debug!(group_id = id, artworks = artworks.len(), "Loaded group for editing");
            Some(group_view(&models, group, artworks))
        }
        None => None,
    };

    let view = WorkshopView {
        default_models: default_model_ids(&models),
        models,
        default_temperature: DEFAULT_TEMPERATURE,
        default_max_tokens: DEFAULT_MAX_TOKENS,
        edit_group,
    };
    Ok(Json(DataResponse { data: view }).into_response())
}

/// GET /gallery
///
/// Redirects to the first category when any exist.
pub async fn gallery(State(state): State<AppState>) -> AppResult<Response> {
    let categories = GroupRepo::distinct_categories(&state.pool).await?;
    if let Some(first) = categories.first() {
        return Ok(found(&category_path(first)));
    }

    let groups = gallery_groups(&state, None).await?;
    Ok(Json(DataResponse {
        data: GalleryView {
            category: None,
            categories,
            groups,
            editing_enabled: state.config.editing_enabled,
        },
    })
    .into_response())
}

/// GET /gallery/category/{name}
pub async fn gallery_category(
    State(state): State<AppState>,
    AppPath(category): AppPath<String>,
) -> AppResult<Json<DataResponse<GalleryView>>> {
    let groups = gallery_groups(&state, Some(&category)).await?;
    let categories = GroupRepo::distinct_categories(&state.pool).await?;
    Ok(Json(DataResponse {
        data: GalleryView {
            category: Some(category),
            categories,
            groups,
            editing_enabled: state.config.editing_enabled,
        },
    }))
}

/// GET /group/{id}?model=openai&model=google
pub async fn group_page(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<DataResponse<GroupPageView>>> {
    let filters = parse_model_filters(query.as_deref())?;
    let group = ensure_group_exists(&state, id).await?;

    let artworks: Vec<Artwork> = ArtworkRepo::list_by_group(&state.pool, id)
        .await?
        .into_iter()
        .filter(|a| matches_any(&filters, &a.model))
        .collect();

    let models = state.catalog.models().await;
    Ok(Json(DataResponse {
        data: GroupPageView {
            group: group_view(&models, group, artworks),
            model_filters: filters.iter().map(|f| f.as_str()).collect(),
            editing_enabled: state.config.editing_enabled,
        },
    }))
}
