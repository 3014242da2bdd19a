// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window rate limiter for the posts API ingress.
//!
//! Tracks per-key request counts over fixed time windows (10 requests per
//! 60 second window by default) and decides admit/deny. Windows roll lazily:
//! a window resets only when a request observes that it has elapsed, never
//! on a timer. A periodic [`RateLimiter::sweep`] evicts entries whose window
//! expired long ago so the table stays bounded under churning keys.

use crate::config::RateLimitConfig;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Quota state for the window active at check time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    /// Maximum admitted requests per window
    pub limit: u32,
    /// Requests left in the window after this one (negative once exceeded)
    pub remaining: i64,
    /// Epoch-ms timestamp when the current window resets
    pub reset_at: i64,
}

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request is within quota
    Admitted(Quota),
    /// Request exceeded quota for its window
    Denied(Quota),
}

impl RateLimitDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted(_))
    }

    /// Quota metadata, carried on both outcomes so response headers can be
    /// attached regardless of admit/deny.
    pub fn quota(&self) -> Quota {
        match self {
            Self::Admitted(quota) | Self::Denied(quota) => *quota,
        }
    }
}

/// Per-key counter state.
#[derive(Debug)]
struct WindowEntry {
    /// Requests counted since `window_start`
    count: u32,
    /// Epoch-ms timestamp when the current window began
    window_start: i64,
}

/// Thread-safe fixed-window rate limiter.
pub struct RateLimiter {
    config: RateLimitConfig,
    entries: Arc<RwLock<HashMap<String, WindowEntry>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Check the caller key against its quota and count this request,
    /// stamped with the current wall-clock time.
    pub async fn check(&self, key: &str) -> RateLimitDecision {
        self.check_and_record(key, Utc::now().timestamp_millis())
            .await
    }

    /// Check and count a request at an explicit timestamp.
    ///
    /// Total over its inputs: it never fails, it only decides. The full
    /// read-modify-write runs under a single write-lock acquisition, so
    /// concurrent checks for the same key can never both observe the same
    /// pre-increment count and slip past the quota together.
    pub async fn check_and_record(&self, key: &str, now_ms: i64) -> RateLimitDecision {
        let limit = self.config.max_requests_per_window;
        let window_ms = self.config.window_ms as i64;

        let mut entries = self.entries.write().await;
        let entry = entries.entry(key.to_string()).or_insert_with(|| WindowEntry {
            count: 0,
            window_start: now_ms,
        });

        // Lazy roll: the boundary instant itself starts a fresh window.
        if now_ms - entry.window_start >= window_ms {
            entry.count = 0;
            entry.window_start = now_ms;
        }

        entry.count += 1;

        let quota = Quota {
            limit,
            remaining: i64::from(limit) - i64::from(entry.count),
            reset_at: entry.window_start + window_ms,
        };

        if entry.count > limit {
            debug!(key, remaining = quota.remaining, "request over quota");
            RateLimitDecision::Denied(quota)
        } else {
            RateLimitDecision::Admitted(quota)
        }
    }

    /// Evict entries whose window expired more than `stale_after` ago
    /// (should be called periodically).
    pub async fn sweep(&self) {
        self.sweep_at(Utc::now().timestamp_millis()).await;
    }

    /// Sweep at an explicit timestamp.
    pub async fn sweep_at(&self, now_ms: i64) {
        let window_ms = self.config.window_ms as i64;
        let stale_ms = self.config.stale_after().as_millis() as i64;

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| now_ms < entry.window_start + window_ms + stale_ms);

        let evicted = before - entries.len();
        if evicted > 0 {
            debug!(evicted, tracked = entries.len(), "swept stale rate limit entries");
        }
    }

    /// Number of caller keys currently tracked.
    pub async fn tracked_keys(&self) -> usize {
        self.entries.read().await.len()
    }
}
