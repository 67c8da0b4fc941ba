use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::auth::{password, provider, validate};
use crate::config::AppConfig;
use crate::store::memory::MemoryStore;
use crate::store::postgres::PgStore;
use crate::store::{DocumentStore, StoreError};

pub async fn init_pool(database_url: &str) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| StoreError::Unavailable(format!("migration failed: {e}")))?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Postgres when `DATABASE_URL` is configured, otherwise a process-local store.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match &config.database_url {
        Some(url) => {
            let pool = init_pool(url).await?;
            run_migrations(&pool).await?;
            log::info!("Using PostgreSQL document store");
            Ok(Arc::new(PgStore::new(pool)))
        }
        None => {
            log::warn!("No DATABASE_URL set, records are kept in memory and lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Ensure the configured admin account exists.
pub async fn seed_admin(store: &dyn DocumentStore, config: &AppConfig) -> Result<(), StoreError> {
    let (Some(email), Some(pass)) = (&config.admin_email, &config.admin_password) else {
        log::warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set, no admin account seeded");
        return Ok(());
    };
    if let Some(weak) = validate::validate_password(pass) {
        log::warn!("ADMIN_PASSWORD is weak: {weak}");
    }
    let hash = password::hash_password(pass).map_err(StoreError::Unavailable)?;
    if provider::seed_admin(store, email, &hash).await? {
        log::info!("Seeded admin account {email}");
    }
    Ok(())
}
