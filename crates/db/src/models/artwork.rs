//! Artwork entity model and DTOs.
//!
//! An artwork is one model's attempt at its group's prompt. Generation
//! parameters are typed columns; `svg` stays empty until the first
//! successful generation and is replaced wholesale on each regeneration.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `artworks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artwork {
    pub id: DbId,
    pub group_id: DbId,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: i64,
    pub svg: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Artwork {
    /// Whether a generation has stored content for this artwork.
    pub fn is_populated(&self) -> bool {
        !self.svg.is_empty()
    }
}

/// DTO for creating a new artwork under an existing group.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArtwork {
    pub group_id: DbId,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: i64,
    /// Previously generated content to store right away. Empty if omitted.
    pub svg: Option<String>,
}

/// DTO for changing generation parameters. Does not touch `svg`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UpdateArtworkParams {
    pub temperature: f64,
    pub max_tokens: i64,
}
