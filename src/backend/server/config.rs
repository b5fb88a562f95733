/**
 * Store Configuration
 *
 * Builds the persistence backend described by `AppConfig`.
 *
 * - `DATABASE_URL` set: connect a PostgreSQL pool and run the embedded
 *   migrations. Any failure aborts startup.
 * - `DATABASE_URL` unset: fall back to the in-memory store. Data does not
 *   survive a restart.
 */

use std::sync::Arc;

use crate::backend::store::{MemoryStore, PgStore, Store, StoreError};
use crate::shared::AppConfig;

pub async fn load_store(config: &AppConfig) -> Result<Arc<dyn Store>, StoreError> {
    let database_url = match config.database_url.as_deref() {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set. Using the in-memory store; data will not persist.");
            return Ok(Arc::new(MemoryStore::new()));
        }
    };

    tracing::info!("Connecting to database...");
    let store = PgStore::connect(database_url, config).await.map_err(|e| {
        tracing::error!("Failed to create database connection pool: {}", e);
        e
    })?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    store.migrate().await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        e
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(Arc::new(store))
}
