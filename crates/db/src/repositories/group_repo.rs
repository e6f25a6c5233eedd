//! Repository for the `artwork_groups` table.

use std::collections::HashMap;

use atelier_core::types::DbId;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::artwork::Artwork;
use crate::models::group::{CreateGroup, Group, GroupsWithArtworks, UpdateGroup};
use crate::repositories::artwork_repo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, prompt, category, original_url, artist_name, created_at, updated_at";

/// Provides CRUD and gallery queries for artwork groups.
pub struct GroupRepo;

impl GroupRepo {
    /// Insert a new group, returning the created row.
    ///
    /// Text fields are stored trimmed. Callers validate that title and
    /// prompt are non-empty first; the table's CHECK constraints are the
    /// backstop.
    pub async fn create(pool: &SqlitePool, input: &CreateGroup) -> Result<Group, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO artwork_groups \
                (title, prompt, category, original_url, artist_name, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(input.title.trim())
            .bind(input.prompt.trim())
            .bind(trimmed_or_empty(&input.category))
            .bind(trimmed_or_empty(&input.original_url))
            .bind(trimmed_or_empty(&input.artist_name))
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a group by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artwork_groups WHERE id = $1");
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List groups, newest first, optionally restricted to one category.
    ///
    /// An empty category string is treated the same as `None`.
    pub async fn list(
        pool: &SqlitePool,
        category: Option<&str>,
    ) -> Result<Vec<Group>, sqlx::Error> {
        match non_empty(category) {
            Some(category) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM artwork_groups WHERE category = $1 \
                     ORDER BY created_at DESC, id DESC"
                );
                sqlx::query_as::<_, Group>(&query)
                    .bind(category)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM artwork_groups ORDER BY created_at DESC, id DESC"
                );
                sqlx::query_as::<_, Group>(&query).fetch_all(pool).await
            }
        }
    }

    /// Replace a group's mutable fields and bump `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateGroup,
    ) -> Result<Option<Group>, sqlx::Error> {
        let query = format!(
            "UPDATE artwork_groups SET \
                title = $2, \
                prompt = $3, \
                category = $4, \
                original_url = $5, \
                artist_name = $6, \
                updated_at = $7 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .bind(input.title.trim())
            .bind(input.prompt.trim())
            .bind(trimmed_or_empty(&input.category))
            .bind(trimmed_or_empty(&input.original_url))
            .bind(trimmed_or_empty(&input.artist_name))
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a group. Its artworks are removed by the foreign-key cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artwork_groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch groups (optionally by category) together with all of their
    /// artworks using exactly two queries.
    ///
    /// The second query selects every artwork whose `group_id` is in the
    /// first result set, so the cost does not grow with the number of
    /// groups.
    pub async fn list_with_artworks(
        pool: &SqlitePool,
        category: Option<&str>,
    ) -> Result<GroupsWithArtworks, sqlx::Error> {
        let groups = Self::list(pool, category).await?;
        if groups.is_empty() {
            return Ok(GroupsWithArtworks::default());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM artworks WHERE group_id IN (",
            artwork_repo::COLUMNS
        ));
        let mut ids = builder.separated(", ");
        for group in &groups {
            ids.push_bind(group.id);
        }
        ids.push_unseparated(") ORDER BY group_id, model ASC, id ASC");

        let artworks = builder.build_query_as::<Artwork>().fetch_all(pool).await?;

        let mut artworks_by_group: HashMap<DbId, Vec<Artwork>> = HashMap::new();
        for artwork in artworks {
            artworks_by_group
                .entry(artwork.group_id)
                .or_default()
                .push(artwork);
        }

        tracing::debug!(
            groups = groups.len(),
            artworks = artworks_by_group.values().map(Vec::len).sum::<usize>(),
            "Loaded groups with artworks"
        );

        Ok(GroupsWithArtworks {
            groups,
            artworks_by_group,
        })
    }

    /// All non-empty categories, sorted and deduplicated.
    pub async fn distinct_categories(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM artwork_groups \
             WHERE category != '' ORDER BY category",
        )
        .fetch_all(pool)
        .await
    }

    /// Pick a random group that has at least one artwork whose model
    /// contains `model_a` and at least one whose model contains `model_b`
    /// (case-insensitive substring match).
    ///
    /// Returns the group with only the matching artworks, `model_a`'s
    /// first, then `model_b`'s, each ordered by model name. Returns `None`
    /// when no group qualifies.
    pub async fn random_with_models(
        pool: &SqlitePool,
        model_a: &str,
        model_b: &str,
    ) -> Result<Option<(Group, Vec<Artwork>)>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artwork_groups g \
             WHERE EXISTS (SELECT 1 FROM artworks a \
                           WHERE a.group_id = g.id AND instr(lower(a.model), lower($1)) > 0) \
               AND EXISTS (SELECT 1 FROM artworks b \
                           WHERE b.group_id = g.id AND instr(lower(b.model), lower($2)) > 0) \
             ORDER BY RANDOM() \
             LIMIT 1"
        );
        let group = sqlx::query_as::<_, Group>(&query)
            .bind(model_a)
            .bind(model_b)
            .fetch_optional(pool)
            .await?;

        let Some(group) = group else {
            return Ok(None);
        };

        let query = format!(
            "SELECT {} FROM artworks \
             WHERE group_id = $1 \
               AND (instr(lower(model), lower($2)) > 0 OR instr(lower(model), lower($3)) > 0) \
             ORDER BY CASE WHEN instr(lower(model), lower($2)) > 0 THEN 0 ELSE 1 END, \
                      model ASC, id ASC",
            artwork_repo::COLUMNS
        );
        let artworks = sqlx::query_as::<_, Artwork>(&query)
            .bind(group.id)
            .bind(model_a)
            .bind(model_b)
            .fetch_all(pool)
            .await?;

        Ok(Some((group, artworks)))
    }
}

fn trimmed_or_empty(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
