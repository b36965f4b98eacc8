#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use shortlink::application::services::resolution_service::DEFAULT_CACHE_TTL_SECONDS;
use shortlink::prelude::*;

/// Cache that keeps entries in memory and records every write.
#[derive(Default)]
pub struct RecordingCache {
    entries: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String, u64)>>,
    failing: bool,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache whose every operation fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<(String, String, u64)> {
        self.writes.lock().clone()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl CacheService for RecordingCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        if self.failing {
            return Err(CacheError::ConnectionError("cache offline".to_string()));
        }
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        if self.failing {
            return Err(CacheError::ConnectionError("cache offline".to_string()));
        }
        self.writes
            .lock()
            .push((key.to_string(), value.to_string(), ttl_seconds));
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.failing
    }
}

/// In-memory repository that counts lookups by short code.
#[derive(Default)]
pub struct CountingRepository {
    inner: InMemoryShortLinkRepository,
    code_lookups: AtomicUsize,
}

impl CountingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code_lookups(&self) -> usize {
        self.code_lookups.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

#[async_trait]
impl ShortLinkRepository for CountingRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        self.inner.create(new_link).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, StoreError> {
        self.code_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_code(short_code).await
    }

    async fn find_by_hash(&self, canonical_hash: &str) -> Result<Option<ShortLink>, StoreError> {
        self.inner.find_by_hash(canonical_hash).await
    }
}

/// Both services over one shared repository and cache.
pub struct TestApp {
    pub repository: Arc<CountingRepository>,
    pub cache: Arc<RecordingCache>,
    pub links: ShortLinkService<CountingRepository>,
    pub resolver: ResolutionService<CountingRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_cache(RecordingCache::new())
    }

    pub fn with_cache(cache: RecordingCache) -> Self {
        let repository = Arc::new(CountingRepository::new());
        let cache = Arc::new(cache);

        let links = ShortLinkService::new(repository.clone(), GenerationPolicy::default());
        let resolver = ResolutionService::new(
            repository.clone(),
            cache.clone(),
            DEFAULT_CACHE_TTL_SECONDS,
        );

        Self {
            repository,
            cache,
            links,
            resolver,
        }
    }

    pub async fn shorten(&self, url: &str) -> ShortLink {
        self.links
            .create(request(url, None, None))
            .await
            .expect("shorten failed")
    }
}

pub fn request(
    url: &str,
    alias: Option<&str>,
    expired_at: Option<DateTime<Utc>>,
) -> CreateShortLink {
    CreateShortLink {
        original_url: url.to_string(),
        custom_alias: alias.map(str::to_string),
        expired_at,
        created_by: "integration".to_string(),
    }
}
