//! API key generation and hashing.
//!
//! Keys are handed to the caller in plaintext exactly once; only the
//! SHA-256 hex digest is ever stored.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a fresh API key.
pub fn generate_api_key() -> String {
    format!("mgl_{}", Uuid::new_v4().simple())
}

/// Hash an API key for storage.
pub fn hash_api_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check a supplied key against a stored hash.
pub fn verify_api_key(key: &str, stored_hash: &str) -> bool {
    hash_api_key(key) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(hash_api_key("secret"), hash_api_key("secret"));
    }

    #[test]
    fn test_verify_round_trip() {
        let key = generate_api_key();
        let hash = hash_api_key(&key);
        assert!(verify_api_key(&key, &hash));
        assert!(!verify_api_key("mgl_wrong", &hash));
    }

    #[test]
    fn test_generated_keys_differ() {
        assert_ne!(generate_api_key(), generate_api_key());
    }

    #[test]
    fn test_hash_is_hex_digest() {
        let hash = hash_api_key("secret");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
