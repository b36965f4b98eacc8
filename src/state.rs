//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{ResolutionService, ShortLinkService};
use crate::config::Config;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::PgShortLinkRepository;

/// Services and backends shared by every request.
///
/// Cheap to clone; all members are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub cache: Arc<dyn CacheService>,
    pub short_link_service: Arc<ShortLinkService<PgShortLinkRepository>>,
    pub resolution_service: Arc<ResolutionService<PgShortLinkRepository>>,
}

impl AppState {
    /// Wires the PostgreSQL repository and the cache into the services.
    pub fn new(pool: Arc<PgPool>, cache: Arc<dyn CacheService>, config: &Config) -> Self {
        let repository = Arc::new(PgShortLinkRepository::new(pool.clone()));

        let short_link_service = Arc::new(ShortLinkService::new(
            repository.clone(),
            config.generation_policy(),
        ));
        let resolution_service = Arc::new(ResolutionService::new(
            repository,
            cache.clone(),
            config.cache_ttl_seconds,
        ));

        Self {
            pool,
            cache,
            short_link_service,
            resolution_service,
        }
    }

    /// Returns true if the database answers a trivial query.
    pub async fn check_database(&self) -> bool {
        match sqlx::query("SELECT 1").execute(self.pool.as_ref()).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                false
            }
        }
    }
}
