//! Runtime initialization.
//!
//! Builds the database pool, applies migrations, connects the cache (or falls
//! back to [`NullCache`]) and wires the services into an [`AppState`].

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::{Config, mask_connection_string};
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::state::AppState;

/// Creates the PostgreSQL pool from the configured pool settings.
///
/// # Errors
///
/// Returns an error if no connection can be established within
/// `DB_CONNECT_TIMEOUT`.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&config.database_url)
            )
        })?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Connected to database"
    );
    Ok(pool)
}

/// Applies pending migrations from `./migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to apply database migrations")?;

    tracing::info!("Database migrations applied");
    Ok(())
}

/// Connects to Redis when configured.
///
/// Caching is an accelerator only: an unreachable Redis degrades to
/// [`NullCache`] with a warning instead of failing startup.
pub async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                redis = %mask_connection_string(redis_url),
                "Failed to connect to Redis, using NullCache"
            );
            Arc::new(NullCache::new())
        }
    }
}

/// Connects every backend, migrates the schema and builds the shared state.
pub async fn initialize(config: &Config) -> Result<AppState> {
    let pool = connect_database(config).await?;
    run_migrations(&pool).await?;
    let cache = connect_cache(config).await;

    Ok(AppState::new(Arc::new(pool), cache, config))
}
