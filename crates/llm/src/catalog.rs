//! Selectable model list backed by the provider's `/models` endpoint.
//!
//! The list is fetched lazily and cached for five minutes. When a refresh
//! fails the previous list is served even if expired; with no previous
//! list the built-in fallback is used. Either way the next attempt waits
//! [`RETRY_BACKOFF`]. Callers always get an arranged list (see
//! [`atelier_core::catalog::arrange`]).

use std::time::{Duration, Instant};

use atelier_core::catalog::{arrange, fallback_models, per_million_cost, ModelInfo};
use serde::Deserialize;
use tokio::sync::RwLock;

/// How long a fetched list stays fresh.
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// How long a stale or fallback list is served before the next fetch.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(30);

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    data: Vec<RemoteModel>,
}

#[derive(Debug, Deserialize)]
struct RemoteModel {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    pricing: Option<RemotePricing>,
}

#[derive(Debug, Deserialize)]
struct RemotePricing {
    #[serde(default)]
    completion: Option<String>,
}

impl From<RemoteModel> for ModelInfo {
    fn from(remote: RemoteModel) -> Self {
        let cost = remote
            .pricing
            .and_then(|p| p.completion)
            .and_then(|c| per_million_cost(&c))
            .unwrap_or(0.0);
        let name = if remote.name.is_empty() {
            remote.id.clone()
        } else {
            remote.name
        };
        ModelInfo {
            id: remote.id,
            name,
            cost,
            checked: false,
        }
    }
}

#[derive(Debug, Default)]
struct CachedModels {
    models: Vec<ModelInfo>,
    expires_at: Option<Instant>,
}

impl CachedModels {
    fn fresh(&self, now: Instant) -> bool {
        !self.models.is_empty() && self.expires_at.is_some_and(|at| now < at)
    }
}

/// Process-wide model catalog, held in application state.
pub struct ModelCatalog {
    client: reqwest::Client,
    base_url: String,
    cache: RwLock<CachedModels>,
}

impl ModelCatalog {
    /// * `base_url` - API root; the list is read from `{base_url}/models`.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: RwLock::new(CachedModels::default()),
        }
    }

    /// The arranged model list: cached, freshly fetched, stale or fallback.
    pub async fn models(&self) -> Vec<ModelInfo> {
        {
            let cache = self.cache.read().await;
            if cache.fresh(Instant::now()) {
                return cache.models.clone();
            }
        }

        let mut cache = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock.
        if cache.fresh(Instant::now()) {
            return cache.models.clone();
        }

        match self.fetch().await {
            Ok(models) if !models.is_empty() => {
                tracing::info!(count = models.len(), "Fetched models from OpenRouter");
                cache.models = arrange(models);
                cache.expires_at = Some(Instant::now() + CACHE_TTL);
                cache.models.clone()
            }
            Ok(_) => {
                tracing::warn!("OpenRouter returned an empty model list");
                Self::serve_stale(&mut cache)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch models from OpenRouter");
                Self::serve_stale(&mut cache)
            }
        }
    }

    /// Catalog name for a model id, or the id itself when unknown.
    pub async fn display_name(&self, id: &str) -> String {
        let models = self.models().await;
        atelier_core::catalog::display_name(&models, id).to_string()
    }

    /// Keep the previous list (or the fallback) and hold off refetching.
    fn serve_stale(cache: &mut CachedModels) -> Vec<ModelInfo> {
        if cache.models.is_empty() {
            cache.models = arrange(fallback_models());
        }
        cache.expires_at = Some(Instant::now() + RETRY_BACKOFF);
        cache.models.clone()
    }

    async fn fetch(&self) -> Result<Vec<ModelInfo>, reqwest::Error> {
        let response: ModelsResponse = self
            .client
            .get(format!("{}/models", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.data.into_iter().map(ModelInfo::from).collect())
    }
}
