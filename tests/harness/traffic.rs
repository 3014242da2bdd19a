// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Traffic patterns for flood simulation.

use posts_api_rate_limiter::limiter::RateLimiter;

/// Traffic pattern configuration.
#[derive(Debug, Clone)]
pub struct TrafficPattern {
    /// Total number of requests to send
    pub total_requests: usize,
    /// Number of unique caller keys to rotate through
    pub unique_keys: usize,
    /// Milliseconds between consecutive requests
    pub spacing_ms: i64,
}

impl TrafficPattern {
    /// Single key flood - basic DoS from one caller.
    pub fn single_key_flood() -> Self {
        Self {
            total_requests: 200,
            unique_keys: 1,
            spacing_ms: 1,
        }
    }

    /// Distributed probe - many callers, each well under quota.
    pub fn distributed_probe() -> Self {
        Self {
            total_requests: 100,
            unique_keys: 100,
            spacing_ms: 1,
        }
    }

    /// Header rotation - one client spraying spoofed keys.
    pub fn key_rotation() -> Self {
        Self {
            total_requests: 50,
            unique_keys: 50,
            spacing_ms: 1,
        }
    }
}

/// Result of a traffic replay.
#[derive(Debug, Clone, Default)]
pub struct FloodResult {
    /// Total requests sent
    pub total_sent: usize,
    /// Requests admitted within quota
    pub admitted: usize,
    /// Requests denied over quota
    pub denied: usize,
}

impl FloodResult {
    /// Calculate block rate (0.0-1.0).
    pub fn block_rate(&self) -> f64 {
        if self.total_sent == 0 {
            0.0
        } else {
            self.denied as f64 / self.total_sent as f64
        }
    }
}

/// Replay a traffic pattern against the limiter, starting at `start_ms`,
/// rotating round-robin through the key pool.
pub async fn replay(
    limiter: &RateLimiter,
    pattern: &TrafficPattern,
    keys: &[String],
    start_ms: i64,
) -> FloodResult {
    let mut result = FloodResult::default();

    for i in 0..pattern.total_requests {
        let key = &keys[i % pattern.unique_keys];
        let now_ms = start_ms + i as i64 * pattern.spacing_ms;

        let decision = limiter.check_and_record(key, now_ms).await;
        result.total_sent += 1;
        if decision.is_admitted() {
            result.admitted += 1;
        } else {
            result.denied += 1;
        }
    }

    result
}
