//! Repository for the `artworks` table.

use atelier_core::types::DbId;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::artwork::{Artwork, CreateArtwork};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, group_id, model, temperature, max_tokens, svg, created_at, updated_at";

/// Provides CRUD operations for artworks.
pub struct ArtworkRepo;

impl ArtworkRepo {
    /// Insert a new artwork, returning the created row.
    ///
    /// Fails with a foreign-key violation if `group_id` does not exist.
    pub async fn create(pool: &SqlitePool, input: &CreateArtwork) -> Result<Artwork, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO artworks \
                (group_id, model, temperature, max_tokens, svg, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(input.group_id)
            .bind(input.model.trim())
            .bind(input.temperature)
            .bind(input.max_tokens)
            .bind(input.svg.as_deref().unwrap_or(""))
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find an artwork by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artworks WHERE id = $1");
        sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all artworks of a group, ordered by model name.
    pub async fn list_by_group(
        pool: &SqlitePool,
        group_id: DbId,
    ) -> Result<Vec<Artwork>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artworks WHERE group_id = $1 ORDER BY model ASC, id ASC"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(group_id)
            .fetch_all(pool)
            .await
    }

    /// Number of artworks remaining in a group.
    pub async fn count_by_group(pool: &SqlitePool, group_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM artworks WHERE group_id = $1")
            .bind(group_id)
            .fetch_one(pool)
            .await
    }

    /// Change only the generation parameters and bump `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_params(
        pool: &SqlitePool,
        id: DbId,
        temperature: f64,
        max_tokens: i64,
    ) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!(
            "UPDATE artworks SET temperature = $2, max_tokens = $3, updated_at = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .bind(temperature)
            .bind(max_tokens)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the stored SVG and bump `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn save_svg(
        pool: &SqlitePool,
        id: DbId,
        svg: &str,
    ) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!(
            "UPDATE artworks SET svg = $2, updated_at = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .bind(svg)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete an artwork. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artworks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
