//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use async_trait::async_trait;

/// Errors returned by a [`ShortLinkRepository`].
///
/// Uniqueness violations are expected under concurrent writers and are the
/// only variant callers may retry on.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(
        "Unique constraint violation on {}",
        .constraint.as_deref().unwrap_or("unknown constraint")
    )]
    UniqueViolation { constraint: Option<String> },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Repository interface for short links.
///
/// Uniqueness of `short_code` (all records) and `canonical_hash` (generated
/// records only) is enforced here, not by callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryShortLinkRepository`] - Process-local implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Persists a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if `short_code` is taken, or if
    /// `canonical_hash` is taken by another generated record.
    ///
    /// Returns [`StoreError::Database`] on any other failure.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError>;

    /// Finds a link by its id.
    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, StoreError>;

    /// Finds a link by its short code, custom or generated.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Finds a generated (non-custom) link by its canonical hash.
    async fn find_by_hash(&self, canonical_hash: &str) -> Result<Option<ShortLink>, StoreError>;
}
