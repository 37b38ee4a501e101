//! Shared test helpers for license tests.

#![allow(dead_code)]

use watchdog_license::{KeyedDigestGenerator, SignedSerialIssuer};

pub const BUNDLE: &str = "Watchdog";

/// Returns a digest generator keyed with a fixed secret.
pub fn test_digest() -> KeyedDigestGenerator {
    KeyedDigestGenerator::new("test-vendor-secret")
}

/// Returns a deterministic Ed25519 issuer from a fixed seed.
pub fn test_issuer() -> SignedSerialIssuer {
    let seed: [u8; 32] = [
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32,
    ];
    SignedSerialIssuer::from_seed(&seed)
}

/// Replaces the first alphanumeric character at or after `from` with a
/// different alphanumeric character.
pub fn alter_char(serial: &str, from: usize) -> String {
    let target = serial
        .char_indices()
        .find(|(i, c)| *i >= from && c.is_ascii_alphanumeric())
        .map(|(i, _)| i)
        .expect("serial has an alphanumeric character");
    serial
        .char_indices()
        .map(|(i, c)| match (i == target, c) {
            (false, c) => c,
            (true, 'A') => 'B',
            (true, _) => 'A',
        })
        .collect()
}
