// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Request-path rate limiting middleware.
//!
//! Sits ahead of authentication and business handlers. Each request is
//! keyed by the first `X-Forwarded-For` hop (falling back to the literal
//! `"unknown"`), counted against its window, and either passed downstream
//! or short-circuited with 429. Quota headers are attached to every
//! response, admitted or denied.
//!
//! The key is client-controlled: unless a trusted proxy overwrites the
//! header, callers can rotate it freely or collapse onto the shared
//! `"unknown"` bucket. That is a deployment requirement, not something
//! this layer can enforce.

use crate::handlers::AppState;
use crate::limiter::Quota;
use crate::metrics;
use axum::{
    extract::{Request, State},
    http::{header::HeaderName, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, info};

pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

const FORWARDED_FOR: &str = "x-forwarded-for";
const FALLBACK_KEY: &str = "unknown";
const DENIED_MESSAGE: &str = "Too many requests, please try again later.";

/// Derive the rate limit key from request headers.
///
/// Takes the first hop of `X-Forwarded-For`; absent or empty values fall
/// back to `"unknown"` so the limiter always receives a non-empty key.
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .unwrap_or(FALLBACK_KEY)
        .to_string()
}

/// Rate limiting middleware stage.
///
/// Runs before any downstream handler; denied requests never reach
/// authentication or the posts procedures.
pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(request.headers());
    let decision = state.limiter.check(&key).await;
    let quota = decision.quota();

    if !decision.is_admitted() {
        metrics::DENIED_TOTAL.inc();
        info!(key = %key, reset_at = quota.reset_at, "request rate limited");
        let mut response = (StatusCode::TOO_MANY_REQUESTS, DENIED_MESSAGE).into_response();
        apply_quota_headers(response.headers_mut(), &quota);
        return response;
    }

    metrics::ADMITTED_TOTAL.inc();
    debug!(key = %key, remaining = quota.remaining, "request admitted");

    let mut response = next.run(request).await;
    apply_quota_headers(response.headers_mut(), &quota);
    response
}

/// Attach `X-RateLimit-*` headers for the window active at check time.
pub fn apply_quota_headers(headers: &mut HeaderMap, quota: &Quota) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(quota.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(quota.remaining));
    headers.insert(X_RATELIMIT_RESET, HeaderValue::from(quota.reset_at));
}
