//! Process-local implementation of the short link repository.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{ShortLinkRepository, StoreError};

/// Constraint names reported on violations, matching the PostgreSQL schema.
pub const SHORT_CODE_CONSTRAINT: &str = "short_links_short_code_key";
pub const CANONICAL_HASH_CONSTRAINT: &str = "short_links_canonical_hash_key";

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    links: HashMap<i64, ShortLink>,
    by_code: HashMap<String, i64>,
    by_hash: HashMap<String, i64>,
}

/// In-memory short link repository.
///
/// Applies the same uniqueness rules as the PostgreSQL schema. A single lock
/// covers the check-and-insert, so concurrent creators see exactly one winner.
#[derive(Debug, Default)]
pub struct InMemoryShortLinkRepository {
    inner: Mutex<Inner>,
}

impl InMemoryShortLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.inner.lock().links.len()
    }

    /// Returns true if no link is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn violation(constraint: &str) -> StoreError {
    StoreError::UniqueViolation {
        constraint: Some(constraint.to_string()),
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryShortLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let mut inner = self.inner.lock();

        if inner.by_code.contains_key(&new_link.short_code) {
            return Err(violation(SHORT_CODE_CONSTRAINT));
        }
        if !new_link.is_custom && inner.by_hash.contains_key(&new_link.canonical_hash) {
            return Err(violation(CANONICAL_HASH_CONSTRAINT));
        }

        inner.next_id += 1;
        let id = inner.next_id;
        let link = new_link.into_short_link(id, Utc::now());

        inner.by_code.insert(link.short_code.clone(), id);
        if !link.is_custom {
            inner.by_hash.insert(link.canonical_hash.clone(), id);
        }
        inner.links.insert(id, link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, StoreError> {
        Ok(self.inner.lock().links.get(&id).cloned())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, StoreError> {
        let inner = self.inner.lock();
        Ok(inner
            .by_code
            .get(short_code)
            .and_then(|id| inner.links.get(id))
            .cloned())
    }

    async fn find_by_hash(&self, canonical_hash: &str) -> Result<Option<ShortLink>, StoreError> {
        let inner = self.inner.lock();
        Ok(inner
            .by_hash
            .get(canonical_hash)
            .and_then(|id| inner.links.get(id))
            .cloned())
    }
}
