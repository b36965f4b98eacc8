//! Pure helpers behind short code creation.
//!
//! - [`url_canonicalizer`] - URL canonicalization for content dedup
//! - [`hasher`] - Truncated SHA-256 hex digests
//! - [`base62`] - Hex-to-base62 encoding of digests
//! - [`code_generator`] - Salted code derivation and alias validation
//! - [`db_error`] - SQLx error classification

pub mod base62;
pub mod code_generator;
pub mod db_error;
pub mod hasher;
pub mod url_canonicalizer;
