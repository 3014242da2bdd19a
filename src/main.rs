// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Posts API Rate Limiter Service
//!
//! An ingress-level rate limiter for the posts API. Every request is counted
//! against a fixed window per caller key before authentication or any posts
//! procedure runs:
//!
//! - 10 requests per 60s window per key (default)
//! - Key from `X-Forwarded-For`, `"unknown"` fallback
//! - Quota headers on every response, 429 on denial
//!
//! ## Usage
//!
//! The service provides two modes of operation:
//!
//! 1. **External auth service**: a fronting proxy calls `/check` with the
//!    caller key and enforces the decision itself.
//!
//! 2. **Direct path**: requests under `/api` pass through the limiter
//!    middleware before reaching the upstream stand-in.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `MAX_REQUESTS`: Max requests per key per window (default: 10)
//! - `WINDOW_MS`: Window length in milliseconds (default: 60000)
//! - `SWEEP_INTERVAL_SECS`: Seconds between eviction sweeps (default: 60)
//! - `STALE_AFTER_SECS`: Idle retention past window expiry (default: 300)

use axum::{
    http::StatusCode,
    routing::{any, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use posts_api_rate_limiter::{
    config::{Config, RateLimitConfig},
    handlers::{check, health, metrics_text, AppState},
    limiter::RateLimiter,
    middleware::rate_limit,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config();
    config.rate_limit.validate()?;
    info!(
        bind_addr = %config.bind_addr,
        max_requests = config.rate_limit.max_requests_per_window,
        window_ms = config.rate_limit.window_ms,
        sweep_interval_secs = config.rate_limit.sweep_interval_secs,
        "Starting posts API rate limiter"
    );

    // Create application state
    let limiter = RateLimiter::new(config.rate_limit.clone());
    let state = Arc::new(AppState {
        limiter,
        config: config.clone(),
    });

    // Spawn eviction sweep task
    let sweep_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_state.config.rate_limit.sweep_interval());
        loop {
            interval.tick().await;
            sweep_state.limiter.sweep().await;
        }
    });

    // Everything under /api runs behind the limiter; health, metrics and
    // the external /check endpoint stay open.
    let guarded = Router::new()
        .route("/api", any(upstream))
        .route("/api/*rest", any(upstream))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit,
        ));

    let mut app = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/check", post(check))
        .merge(guarded);

    if state.config.metrics.enabled {
        app = app.route(&state.config.metrics.path, get(metrics_text));
    }

    let app = app.layer(TraceLayer::new_for_http()).with_state(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Stand-in for the upstream posts API.
///
/// Anything that reaches this handler has already passed the limiter. In a
/// real deployment the request would be forwarded upstream here.
async fn upstream() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Load configuration from environment variables.
fn load_config() -> Config {
    Config {
        bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        rate_limit: RateLimitConfig {
            max_requests_per_window: std::env::var("MAX_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            window_ms: std::env::var("WINDOW_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60_000),
            sweep_interval_secs: std::env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            stale_after_secs: std::env::var("STALE_AFTER_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        },
        ..Default::default()
    }
}
