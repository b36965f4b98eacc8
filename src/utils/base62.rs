//! Base62 encoding of hex digests into short codes.
//!
//! The alphabet is `0-9a-zA-Z`, so codes need no escaping inside a URL path.
//!
//! # Truncation
//!
//! [`encode_hex`] keeps only the most-significant `length` characters of the
//! full encoding. A 64-bit digest needs 11 base62 characters; keeping 8 leaves
//! roughly 2^47.6 distinct codes, so unrelated URLs can and eventually will map
//! to the same code. Callers must treat a persisted code as possibly taken and
//! retry with a different input, which is what
//! [`crate::application::services::ShortLinkService`] does.

/// The 62-character alphabet, digits then lowercase then uppercase.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Default short code length.
pub const DEFAULT_CODE_LENGTH: usize = 8;

const BASE: u32 = 62;

/// Errors that can occur while encoding.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Base62Error {
    #[error("Hex input is empty")]
    Empty,

    #[error("Invalid hex digit '{digit}' at position {position}")]
    InvalidHexDigit { digit: char, position: usize },
}

/// Encodes a hex string as base62, truncated to `length` characters.
///
/// The hex string is read as an unsigned big-endian integer of any size. Zero
/// encodes as `"0"`. Leading zero digits in the input do not affect the output.
///
/// # Errors
///
/// Returns [`Base62Error`] if `hex` is empty or contains a non-hex character.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(encode_hex("ff", 8).unwrap(), "47");
/// assert_eq!(encode_hex("ffffffffffffffff", 8).unwrap(), "lYGhA16a");
/// ```
pub fn encode_hex(hex: &str, length: usize) -> Result<String, Base62Error> {
    if hex.is_empty() {
        return Err(Base62Error::Empty);
    }

    let mut digits = hex
        .chars()
        .enumerate()
        .map(|(position, digit)| {
            digit
                .to_digit(16)
                .ok_or(Base62Error::InvalidHexDigit { digit, position })
        })
        .collect::<Result<Vec<u32>, _>>()?;

    let leading_zeros = digits.iter().take_while(|&&d| d == 0).count();
    digits.drain(..leading_zeros);

    if digits.is_empty() {
        return Ok(char::from(BASE62_ALPHABET[0]).to_string());
    }

    // Schoolbook long division of the base-16 digit string by 62.
    let mut encoded = Vec::new();
    while !digits.is_empty() {
        let mut remainder = 0u32;
        let mut quotient = Vec::with_capacity(digits.len());

        for &digit in &digits {
            let acc = remainder * 16 + digit;
            let q = acc / BASE;
            remainder = acc % BASE;
            if !(quotient.is_empty() && q == 0) {
                quotient.push(q);
            }
        }

        encoded.push(BASE62_ALPHABET[remainder as usize]);
        digits = quotient;
    }

    encoded.reverse();
    encoded.truncate(length);

    Ok(encoded.into_iter().map(char::from).collect())
}

/// Returns true if every character of `code` belongs to [`BASE62_ALPHABET`].
#[cfg(test)]
pub(crate) fn is_base62(code: &str) -> bool {
    code.bytes().all(|b| b.is_ascii_alphanumeric())
}
