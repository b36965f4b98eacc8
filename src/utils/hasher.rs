//! Content hashing for canonical URLs.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the SHA-256 digest (64 bits).
pub const DEFAULT_HASH_LENGTH: usize = 16;

/// Separator between a text and its salt.
///
/// Canonical URLs never contain a fragment, so `#` cannot be confused with
/// URL content.
pub const SALT_SEPARATOR: char = '#';

/// Hashes `text` into a [`DEFAULT_HASH_LENGTH`]-character lowercase hex string.
///
/// With a salt, the digest input is `text#salt`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(hash_text("https://x.com/", None).len(), 16);
/// assert_eq!(
///     hash_text("https://x.com/", Some("1")),
///     hash_text("https://x.com/#1", None)
/// );
/// ```
pub fn hash_text(text: &str, salt: Option<&str>) -> String {
    hash_text_with_length(text, salt, DEFAULT_HASH_LENGTH)
}

/// Same as [`hash_text`] with an explicit output length, capped at 64.
pub fn hash_text_with_length(text: &str, salt: Option<&str>, length: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    if let Some(salt) = salt {
        let mut separator = [0u8; 4];
        hasher.update(SALT_SEPARATOR.encode_utf8(&mut separator).as_bytes());
        hasher.update(salt.as_bytes());
    }

    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(length);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_stability() {
        let first = hash_text("https://example.com/", None);
        let second = hash_text("https://example.com/", None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_hash_format() {
        let hash = hash_text("https://example.com/", None);
        assert_eq!(hash.len(), DEFAULT_HASH_LENGTH);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_hash_is_sha256_prefix() {
        // sha256("abc") = ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad
        assert_eq!(hash_text("abc", None), "ba7816bf8f01cfea");
        assert_eq!(
            hash_text_with_length("abc", None, 64),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_salt_joins_with_separator() {
        assert_eq!(
            hash_text("https://x.com/a", Some("3")),
            hash_text("https://x.com/a#3", None)
        );
    }

    #[test]
    fn test_salt_changes_hash() {
        let unsalted = hash_text("https://x.com/a", None);
        let salted = hash_text("https://x.com/a", Some("1"));
        assert_ne!(unsalted, salted);
    }

    #[test]
    fn test_length_is_capped_by_digest() {
        assert_eq!(hash_text_with_length("abc", None, 100).len(), 64);
    }
}
