// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for traffic simulation.

/// Generate a pool of forwarded-address keys for testing.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            // Use 10.x.x.x private range
            let a = (i >> 16) & 0xFF;
            let b = (i >> 8) & 0xFF;
            let c = i & 0xFF;
            format!("10.{}.{}.{}", a, b, c)
        })
        .collect()
}

/// Header values a client might send to dodge or confuse keying.
/// Every entry maps to a deterministic key, never to a failure.
pub fn spoofed_header_values() -> Vec<Option<&'static str>> {
    vec![
        Some("1.2.3.4"),
        Some("1.2.3.4, 10.0.0.1"),
        Some("  1.2.3.4  "),
        Some(""),
        Some("   "),
        Some(",1.2.3.4"),
        None,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_keys_unique() {
        let keys = generate_keys(512);
        assert_eq!(keys.len(), 512);
        let unique: std::collections::HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), 512);
    }
}
