//! Shared query parameter types for API handlers.

use atelier_core::error::CoreError;
use atelier_core::gallery::ProviderFilter;
use atelier_core::types::DbId;
use serde::Deserialize;

/// Optional `?category=` filter for group listings.
#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
}

/// `?edit=` on the workshop page.
#[derive(Debug, Deserialize)]
pub struct WorkshopParams {
    pub edit: Option<DbId>,
}

/// Parse provider filters from a raw query string.
///
/// Accepts repeated keys (`?model=openai&model=google`) and
/// comma-separated values (`?model=openai,google`). Other keys are ignored.
pub fn parse_model_filters(raw_query: Option<&str>) -> Result<Vec<ProviderFilter>, CoreError> {
    let Some(raw) = raw_query else {
        return Ok(Vec::new());
    };

    let mut filters = Vec::new();
    for pair in raw.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if key != "model" {
            continue;
        }
        for part in value.split(',').filter(|p| !p.trim().is_empty()) {
            let filter = ProviderFilter::parse(part)?;
            if !filters.contains(&filter) {
                filters.push(filter);
            }
        }
    }
    Ok(filters)
}
