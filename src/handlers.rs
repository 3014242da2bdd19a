// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the rate limiter service.
//!
//! Besides the request-path middleware (see [`crate::middleware`]), the
//! service exposes an external `/check` endpoint so a fronting proxy can
//! query the limiter and enforce the decision itself.

use crate::config::Config;
use crate::limiter::RateLimiter;
use crate::metrics;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Shared application state.
pub struct AppState {
    pub limiter: RateLimiter,
    pub config: Config,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Rate limit check request (for external enforcement).
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub key: String,
}

/// Rate limit check response.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: i64,
    pub reset_at: i64,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "posts-api-rate-limiter",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Check a caller key against its quota.
///
/// Called by a fronting proxy that enforces the decision itself. The check
/// counts against the same window table as the middleware, so both modes
/// see one quota per key.
pub async fn check(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckRequest>,
) -> Json<CheckResponse> {
    // Same trimming and fallback as the request path, so both modes key
    // identically and the limiter never sees an empty key.
    let trimmed = req.key.trim();
    let key = if trimmed.is_empty() {
        debug!("empty key in check request, using fallback");
        "unknown".to_string()
    } else {
        trimmed.to_string()
    };

    let decision = state.limiter.check(&key).await;
    let quota = decision.quota();

    if decision.is_admitted() {
        metrics::ADMITTED_TOTAL.inc();
        debug!(key = %key, remaining = quota.remaining, "check admitted");
    } else {
        metrics::DENIED_TOTAL.inc();
        info!(key = %key, reset_at = quota.reset_at, "check denied");
    }

    Json(CheckResponse {
        allowed: decision.is_admitted(),
        limit: quota.limit,
        remaining: quota.remaining,
        reset_at: quota.reset_at,
    })
}

/// Prometheus text exposition endpoint.
pub async fn metrics_text(State(state): State<Arc<AppState>>) -> Response {
    metrics::TRACKED_KEYS.set(state.limiter.tracked_keys().await as i64);

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&prometheus::gather(), &mut buffer) {
        error!(%err, "failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response()
}
