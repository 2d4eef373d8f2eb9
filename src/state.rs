use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;
use studentdesk_cache::{CacheConfig, CacheStore, MemoryCache, RedisCache};
use studentdesk_config::{CorsConfig, JwtConfig};
use studentdesk_db::{DatabaseConfig, init_db_pool};
use tracing::{info, warn};

use crate::modules::students::cache::ProfileCache;
use crate::modules::students::repository::PgStudentRepository;
use crate::modules::students::service::StudentService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub students: StudentService,
}

/// Connects the configured cache backend.
///
/// Falls back to the in-process store when `REDIS_URL` is unset.
pub async fn init_cache_store(config: &CacheConfig) -> anyhow::Result<Arc<dyn CacheStore>> {
    match &config.redis_url {
        Some(url) => {
            let cache = RedisCache::connect(url)
                .await
                .context("Failed to connect to Redis")?;
            info!("Using Redis profile cache");
            Ok(Arc::new(cache))
        }
        None => {
            warn!("REDIS_URL not set, using in-process profile cache");
            Ok(Arc::new(MemoryCache::new()))
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db_config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let db = init_db_pool(&db_config)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("Failed to run database migrations")?;

    let cache_config = CacheConfig::from_env();
    let store = init_cache_store(&cache_config).await?;

    let students = StudentService::new(
        Arc::new(PgStudentRepository::new(db.clone())),
        ProfileCache::new(store, cache_config.profile_ttl()),
    );

    Ok(AppState {
        db,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        students,
    })
}
