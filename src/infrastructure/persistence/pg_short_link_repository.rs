//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{ShortLinkRepository, StoreError};
use crate::utils::db_error::map_sqlx_error;

const COLUMNS: &str = "id, original_url, canonical_url, canonical_hash, short_code, \
                       created_by, is_custom, expired_at, created_at, updated_at";

/// Row shape of the `short_links` table.
#[derive(Debug, sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    original_url: String,
    canonical_url: String,
    canonical_hash: String,
    short_code: String,
    created_by: String,
    is_custom: bool,
    expired_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink {
            id: row.id,
            original_url: row.original_url,
            canonical_url: row.canonical_url,
            canonical_hash: row.canonical_hash,
            short_code: row.short_code,
            created_by: row.created_by,
            is_custom: row.is_custom,
            expired_at: row.expired_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL repository for short links.
///
/// Uniqueness is enforced by the `short_links_short_code_key` constraint and
/// the partial `short_links_canonical_hash_key` index (generated records only).
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        condition: &'static str,
        value: &str,
    ) -> Result<Option<ShortLink>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM short_links WHERE {condition}");

        let row = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(value)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(ShortLink::from))
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO short_links
                (short_code, original_url, canonical_url, canonical_hash, created_by, is_custom, expired_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(&new_link.short_code)
            .bind(&new_link.original_url)
            .bind(&new_link.canonical_url)
            .bind(&new_link.canonical_hash)
            .bind(&new_link.created_by)
            .bind(new_link.is_custom)
            .bind(new_link.expired_at)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM short_links WHERE id = $1");

        let row = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(ShortLink::from))
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, StoreError> {
        self.find_one("short_code = $1", short_code).await
    }

    async fn find_by_hash(&self, canonical_hash: &str) -> Result<Option<ShortLink>, StoreError> {
        self.find_one("canonical_hash = $1 AND NOT is_custom", canonical_hash).await
    }
}
