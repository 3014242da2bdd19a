// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for rate limiter traffic simulation.
//!
//! Provides utilities for replaying traffic patterns against the limiter
//! to validate quota enforcement under abusive loads.

pub mod generators;
pub mod traffic;
