//! Short code derivation and custom alias validation.
//!
//! Generated codes are a pure function of the canonical URL and the attempt
//! number: `encode_hex(hash_text(salted_input(url, attempt)))`. Attempt 0 hashes
//! the canonical URL itself; attempt `n > 0` hashes `url#n`.

use std::borrow::Cow;

use crate::error::AppError;
use crate::utils::base62::encode_hex;
use crate::utils::hasher::{SALT_SEPARATOR, hash_text};
use serde_json::json;

/// Maximum length of a user-chosen alias.
pub const MAX_ALIAS_LENGTH: usize = 255;

/// A short code candidate together with the hash it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCandidate {
    /// Hash of the salted input; stored as the record's dedup key.
    pub hash: String,
    pub short_code: String,
}

/// Returns the hash input for a generation attempt.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(salted_input("https://x.com/", 0), "https://x.com/");
/// assert_eq!(salted_input("https://x.com/", 2), "https://x.com/#2");
/// ```
pub fn salted_input(canonical_url: &str, attempt: u32) -> Cow<'_, str> {
    if attempt == 0 {
        Cow::Borrowed(canonical_url)
    } else {
        Cow::Owned(format!("{canonical_url}{SALT_SEPARATOR}{attempt}"))
    }
}

/// Derives the candidate short code for `attempt`.
///
/// # Errors
///
/// Never fails for hasher output; the `Result` surfaces a broken hex invariant
/// as [`AppError::InvalidInput`] instead of panicking.
pub fn derive_candidate(
    canonical_url: &str,
    attempt: u32,
    code_length: usize,
) -> Result<CodeCandidate, AppError> {
    let hash = hash_text(&salted_input(canonical_url, attempt), None);
    let short_code = encode_hex(&hash, code_length).map_err(|e| {
        AppError::invalid_input(
            "Failed to encode hash",
            json!({ "hash": hash, "reason": e.to_string() }),
        )
    })?;

    Ok(CodeCandidate { hash, short_code })
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 1-255 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_alias("my-link_2024").is_ok());
/// assert!(validate_custom_alias("").is_err());
/// assert!(validate_custom_alias("has space").is_err());
/// ```
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::invalid_input(
            format!("Custom alias must be 1-{MAX_ALIAS_LENGTH} characters"),
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::invalid_input(
            "Custom alias can only contain letters, digits, hyphens and underscores",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
