// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Posts API Rate Limiter
//!
//! This crate provides ingress-level rate limiting for the posts API,
//! applied ahead of authentication and the posts procedures:
//!
//! - Fixed-window quota per caller key (10 requests / 60s default)
//! - Key taken from `X-Forwarded-For`, with an `"unknown"` fallback
//! - `X-RateLimit-Limit` / `-Remaining` / `-Reset` headers on every response
//! - HTTP 429 short-circuit on denial
//! - Periodic eviction of counters whose window has long expired

pub mod config;
pub mod handlers;
pub mod limiter;
pub mod metrics;
pub mod middleware;

pub use config::Config;
pub use limiter::{Quota, RateLimitDecision, RateLimiter};
pub use middleware::rate_limit;
