//! In-memory sliding-window rate limiter for mutating requests.
//!
//! Each client key keeps the timestamps of its recent requests. A request
//! is admitted while fewer than `limit` of them fall inside the window.
//! Safe methods (`GET`, `HEAD`, `OPTIONS`) are never counted.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::state::AppState;

pub struct RateLimiter {
    window: Duration,
    limit: usize,
    requests: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            window,
            limit,
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// `limit` requests per rolling minute.
    pub fn per_minute(limit: usize) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    /// Record a request for `key` now. Returns `false` if it is over the limit.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    /// [`check`](Self::check) with an explicit clock reading.
    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let recent = requests.entry(key.to_string()).or_default();
        recent.retain(|&at| now.saturating_duration_since(at) < self.window);

        if recent.len() < self.limit {
            recent.push(now);
            true
        } else {
            false
        }
    }

    /// Drop keys with no request inside the window.
    pub fn prune(&self, now: Instant) {
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        requests.retain(|_, recent| {
            recent.retain(|&at| now.saturating_duration_since(at) < self.window);
            !recent.is_empty()
        });
    }

    /// Number of tracked client keys.
    pub fn tracked_clients(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Identify the client: first `X-Forwarded-For` entry, then `X-Real-IP`,
/// then the peer address, then `"unknown"`.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(forwarded) = header("x-forwarded-for") {
        if let Some(first) = forwarded.split(',').map(str::trim).find(|s| !s.is_empty()) {
            return first.to_string();
        }
    }
    if let Some(real_ip) = header("x-real-ip") {
        return real_ip.to_string();
    }
    match peer {
        Some(addr) => addr.ip().to_string(),
        None => "unknown".to_string(),
    }
}

fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Middleware applied to the `/api` routes: counts and limits mutations.
pub async fn limit_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if is_safe(request.method()) {
        return next.run(request).await;
    }

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = client_key(request.headers(), peer);

    if !state.rate_limiter.check(&key) {
        tracing::warn!(client = %key, path = %request.uri().path(), "Rate limit exceeded");
        return AppError::RateLimited.into_response();
    }

    next.run(request).await
}
