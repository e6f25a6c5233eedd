//! Artwork group entity model and DTOs.
//!
//! A group is one creative prompt plus descriptive metadata. Every
//! artwork belongs to exactly one group and is deleted with it.

use std::collections::HashMap;

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::artwork::Artwork;

/// A row from the `artwork_groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Group {
    pub id: DbId,
    pub title: String,
    pub prompt: String,
    pub category: String,
    pub original_url: String,
    pub artist_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new group.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroup {
    pub title: String,
    pub prompt: String,
    pub category: Option<String>,
    pub original_url: Option<String>,
    pub artist_name: Option<String>,
}

/// DTO for replacing a group's mutable fields.
///
/// This is a full replace: omitted optional fields are stored as empty.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGroup {
    pub title: String,
    pub prompt: String,
    pub category: Option<String>,
    pub original_url: Option<String>,
    pub artist_name: Option<String>,
}

/// A group together with its artworks, ordered by model name.
#[derive(Debug, Clone, Serialize)]
pub struct GroupWithArtworks {
    #[serde(flatten)]
    pub group: Group,
    pub artworks: Vec<Artwork>,
}

/// Result of the batched gallery fetch: groups in display order plus their
/// artworks keyed by group id. Groups without artworks have no map entry.
#[derive(Debug, Clone, Default)]
pub struct GroupsWithArtworks {
    pub groups: Vec<Group>,
    pub artworks_by_group: HashMap<DbId, Vec<Artwork>>,
}

impl GroupsWithArtworks {
    /// Artworks of one group, empty when it has none.
    pub fn artworks_for(&self, group_id: DbId) -> &[Artwork] {
        self.artworks_by_group
            .get(&group_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of artworks across all groups.
    pub fn artwork_count(&self) -> usize {
        self.artworks_by_group.values().map(Vec::len).sum()
    }
}
