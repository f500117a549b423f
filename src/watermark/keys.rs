//! Artwork identifiers and buyer keys.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `unique_key`. This is what gets embedded after
/// `COPYRIGHT:`.
pub fn copyright_hash(unique_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(unique_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Fresh per-artwork key: hex SHA-256 of `"<uuid>_<owner>_<filename>"`.
pub fn generate_unique_key(owner_id: &str, filename: &str) -> String {
    let combined = format!("{}_{}_{}", uuid::Uuid::new_v4(), owner_id, filename);
    copyright_hash(&combined)
}

/// Random lowercase hex token of `length` characters.
pub fn generate_buyer_key(length: usize) -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..(length + 1) / 2).map(|_| rng.gen()).collect();

    let mut key = hex::encode(bytes);
    key.truncate(length);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copyright_hash_is_sha256_hex() {
        assert_eq!(
            copyright_hash("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_unique_keys_differ() {
        let a = generate_unique_key("user-1", "art.png");
        let b = generate_unique_key("user-1", "art.png");
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn test_buyer_key_shape() {
        for length in [1, 7, 8, 16] {
            let key = generate_buyer_key(length);
            assert_eq!(key.len(), length);
            assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
        assert_eq!(generate_buyer_key(0), "");
    }
}
