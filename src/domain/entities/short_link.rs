//! Short link entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted mapping from a short code to a submitted URL.
///
/// All fields except `updated_at` are fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortLink {
    pub id: i64,
    /// URL exactly as submitted.
    pub original_url: String,
    pub canonical_url: String,
    /// Dedup key. For generated codes this is the hash of the salted input
    /// that produced `short_code`, not necessarily of `canonical_url` alone.
    pub canonical_hash: String,
    pub short_code: String,
    pub created_by: String,
    /// True when `short_code` is a user-chosen alias.
    pub is_custom: bool,
    pub expired_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShortLink {
    /// Returns true if the link expired strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expired_at.is_some_and(|expired_at| expired_at < now)
    }
}

/// Input data for creating a new short link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShortLink {
    pub short_code: String,
    pub original_url: String,
    pub canonical_url: String,
    pub canonical_hash: String,
    pub created_by: String,
    pub is_custom: bool,
    pub expired_at: Option<DateTime<Utc>>,
}

impl NewShortLink {
    /// Builds the stored entity once the store has assigned id and timestamps.
    pub fn into_short_link(self, id: i64, now: DateTime<Utc>) -> ShortLink {
        ShortLink {
            id,
            original_url: self.original_url,
            canonical_url: self.canonical_url,
            canonical_hash: self.canonical_hash,
            short_code: self.short_code,
            created_by: self.created_by,
            is_custom: self.is_custom,
            expired_at: self.expired_at,
            created_at: now,
            updated_at: now,
        }
    }
}
