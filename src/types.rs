//! Core type aliases shared across the crate.

/// 32-byte BLAKE3 digest.
pub type Hash = [u8; 32];

/// Hex-encode a hash for display and JSON output.
pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}
