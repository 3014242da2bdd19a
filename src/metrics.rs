// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus metrics for the rate limiter.

use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_gauge, IntCounter, IntGauge};

lazy_static! {
    pub static ref ADMITTED_TOTAL: IntCounter = register_int_counter!(
        "rate_limiter_admitted_total",
        "Requests admitted within quota"
    )
    .unwrap();
    pub static ref DENIED_TOTAL: IntCounter = register_int_counter!(
        "rate_limiter_denied_total",
        "Requests denied over quota"
    )
    .unwrap();
    pub static ref TRACKED_KEYS: IntGauge = register_int_gauge!(
        "rate_limiter_tracked_keys",
        "Caller keys currently tracked in the window table"
    )
    .unwrap();
}
