use std::sync::Arc;

use atelier_llm::{ModelCatalog, SvgGenerator};

use crate::config::ServerConfig;
use crate::in_flight::InFlightGenerations;
use crate::middleware::rate_limit::RateLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: atelier_db::DbPool,
    /// Server configuration (editing flag, limits, provider settings).
    pub config: Arc<ServerConfig>,
    /// SVG generator; the OpenRouter client in production.
    pub generator: Arc<dyn SvgGenerator>,
    /// Cached list of selectable models.
    pub catalog: Arc<ModelCatalog>,
    /// Per-client sliding-window limiter for mutating requests.
    pub rate_limiter: Arc<RateLimiter>,
    /// Artworks with a generation currently running.
    pub in_flight: Arc<InFlightGenerations>,
}
