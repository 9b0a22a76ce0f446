//! Shared API key hashing and verification.
//!
//! The server keeps only the SHA-256 digest of the configured key and
//! compares digests of presented keys against it.

use sha2::{Digest, Sha256};

/// Name of the request header carrying the key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// SHA-256 hex digest of a plaintext key.
pub fn hash_api_key(key: &str) -> String {
    let hash = Sha256::digest(key.as_bytes());
    format!("{hash:x}")
}

/// Check a presented plaintext key against the stored digest.
///
/// The digest comparison touches every byte regardless of where the first
/// mismatch is.
pub fn verify_api_key(presented: &str, expected_hash: &str) -> bool {
    let actual = hash_api_key(presented);
    if actual.len() != expected_hash.len() {
        return false;
    }
    actual
        .bytes()
        .zip(expected_hash.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
