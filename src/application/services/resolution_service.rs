//! Short code resolution with cache-aside caching.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Default (and maximum) lifetime of a cached resolution: 24 hours.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 86_400;

const CACHE_KEY_PREFIX: &str = "short_link:";

/// Builds the cache key for a short code.
pub fn cache_key(short_code: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{short_code}")
}

/// Computes the cache TTL for a resolved link.
///
/// Links without expiry use `default_ttl`. Links with expiry use the whole
/// seconds remaining until `expired_at`, capped at `default_ttl`. Returns `None`
/// when nothing should be cached (expiry at or before `now`, or within the
/// current second).
pub fn cache_ttl(
    expired_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    default_ttl: u64,
) -> Option<u64> {
    let Some(expired_at) = expired_at else {
        return Some(default_ttl).filter(|ttl| *ttl > 0);
    };

    let remaining = u64::try_from((expired_at - now).num_seconds()).ok()?;
    Some(remaining.min(default_ttl)).filter(|ttl| *ttl > 0)
}

/// Resolves short codes to their original URLs.
///
/// The store is the source of truth. The cache only accelerates reads: a
/// failing cache behaves as an empty one and never fails a resolution.
pub struct ResolutionService<R: ShortLinkRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    default_ttl: u64,
}

impl<R: ShortLinkRepository> ResolutionService<R> {
    /// Creates a new resolution service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>, default_ttl: u64) -> Self {
        Self {
            repository,
            cache,
            default_ttl,
        }
    }

    /// Resolves `short_code` to the URL it was created from.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown or expired.
    /// Returns [`AppError::Store`] if the store lookup fails.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        self.resolve_at(short_code, Utc::now()).await
    }

    /// Same as [`Self::resolve`], evaluating expiry against `now`.
    pub async fn resolve_at(
        &self,
        short_code: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let key = cache_key(short_code);

        match self.cache.get(&key).await {
            Ok(Some(url)) => return Ok(url),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Cache read failed, falling back to store");
            }
        }

        let link = self
            .repository
            .find_by_code(short_code)
            .await?
            .filter(|link| !link.is_expired_at(now))
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "code": short_code }))
            })?;

        match cache_ttl(link.expired_at, now, self.default_ttl) {
            Some(ttl) => {
                if let Err(e) = self.cache.set(&key, &link.original_url, ttl).await {
                    tracing::warn!(error = %e, key = %key, "Cache write failed");
                }
            }
            None => {
                tracing::debug!(key = %key, "Link expires within the current second, not cached");
            }
        }

        Ok(link.original_url)
    }
}
