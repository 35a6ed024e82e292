//! Content hashing for cache file integrity checks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// XXH3-128 digest of a cache payload or a project namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentHash(u128);

impl ContentHash {
    /// Hashes `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(xxhash_rust::xxh3::xxh3_128(data))
    }
}

/// Lower-case hex, zero-padded to 32 digits.
impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_payload_same_hash() {
        let a = ContentHash::from_bytes(b"entity decoder ");
        let b = ContentHash::from_bytes(b"entity decoder ");
        assert_eq!(a, b);
    }

    #[test]
    fn one_byte_change_differs() {
        let a = ContentHash::from_bytes(b"entity decoder ");
        let b = ContentHash::from_bytes(b"entity decodes ");
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_32_hex_chars() {
        let s = ContentHash::from_bytes(b"payload").to_string();
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn serde_json_keeps_value() {
        let h = ContentHash::from_bytes(b"serde");
        let json = serde_json::to_string(&h).unwrap();
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}
