//! Database test fixtures and utilities
//!
//! The PostgreSQL suite only runs when `DATABASE_URL` points at a
//! disposable database: `cargo test -- --ignored`.

use std::time::Duration;

use parley::backend::store::PgStore;

/// Connect a `PgStore` to `DATABASE_URL` and apply the migrations.
pub async fn create_test_store() -> PgStore {
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for database tests");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to create test database pool");

    let store = PgStore::new(pool, Duration::from_secs(5));
    store.migrate().await.expect("Failed to run migrations");
    store
}

/// Remove all rows while keeping the schema.
pub async fn cleanup_test_data(store: &PgStore) -> Result<(), sqlx::Error> {
    sqlx::query("TRUNCATE TABLE friends, messages, accounts CASCADE")
        .execute(store.pool())
        .await?;
    Ok(())
}

/// Test database fixture
pub struct TestDatabase {
    store: PgStore,
}

impl TestDatabase {
    /// Connect, migrate and start from empty tables.
    pub async fn new() -> Self {
        let store = create_test_store().await;
        cleanup_test_data(&store)
            .await
            .expect("Failed to clean test database");
        Self { store }
    }

    pub fn store(&self) -> &PgStore {
        &self.store
    }
}
