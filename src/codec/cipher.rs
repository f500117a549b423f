//! # XOR Stream Cipher
//!
//! Symmetric obfuscation for the creator message: `out[i] = data[i] ^ key[i % key.len()]`.
//! Applying the same key twice gives back the input. This hides the message
//! from a casual reader of the extracted watermark; it is not encryption in
//! any cryptographic sense.

use super::error::StegoError;
use super::Result;

/// XOR `data` with `key`, one Unicode scalar value at a time.
///
/// # Errors
/// - [`StegoError::EmptyKey`] if `key` is empty
/// - [`StegoError::InvalidCodePoint`] if a XOR result is not a valid `char`
///   (only reachable with non-ASCII keys)
pub fn transform(data: &str, key: &str) -> Result<String> {
    let key: Vec<u32> = key.chars().map(u32::from).collect();
    if key.is_empty() {
        return Err(StegoError::EmptyKey);
    }

    data.chars()
        .enumerate()
        .map(|(position, c)| {
            let value = u32::from(c) ^ key[position % key.len()];
            char::from_u32(value).ok_or(StegoError::InvalidCodePoint { position, value })
        })
        .collect()
}

/// Byte-level variant of [`transform`].
pub fn transform_bytes(data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    if key.is_empty() {
        return Err(StegoError::EmptyKey);
    }

    Ok(data
        .iter()
        .zip(key.iter().cycle())
        .map(|(d, k)| d ^ k)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_is_symmetric() {
        let key = "3f9a0c1e";
        for message in ["Hello World", "", "a", "Dibuat oleh kreator ✨", "<END>"] {
            let hidden = transform(message, key).unwrap();
            assert_eq!(transform(&hidden, key).unwrap(), message);
        }
    }

    #[test]
    fn test_transform_changes_text() {
        let hidden = transform("secret", "k").unwrap();
        assert_ne!(hidden, "secret");
        assert_eq!(hidden.chars().count(), 6);
    }

    #[test]
    fn test_key_repeats_over_message() {
        // 'a' ^ 'a' == 0 at every position when the key is a single 'a'
        assert_eq!(transform("aaa", "a").unwrap(), "\0\0\0");
    }

    #[test]
    fn test_empty_key_is_rejected() {
        assert!(matches!(transform("anything", ""), Err(StegoError::EmptyKey)));
        assert!(matches!(transform("", ""), Err(StegoError::EmptyKey)));
        assert!(matches!(transform_bytes(b"x", b""), Err(StegoError::EmptyKey)));
    }

    #[test]
    fn test_invalid_code_point_is_reported() {
        // U+D7FF ^ U+0FFF == 0xD800, a surrogate
        let err = transform("\u{D7FF}", "\u{FFF}").unwrap_err();
        assert!(matches!(err, StegoError::InvalidCodePoint { position: 0, .. }));
    }

    #[test]
    fn test_bytes_round_trip() {
        let data = [0x00, 0x7f, 0x80, 0xff, 0x42];
        let once = transform_bytes(&data, b"key").unwrap();
        assert_eq!(transform_bytes(&once, b"key").unwrap(), data.to_vec());
    }
}
