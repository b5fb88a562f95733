/**
 * Server Initialization
 *
 * Turns a loaded `AppConfig` into a ready-to-serve router:
 *
 * 1. Build the store backend (PostgreSQL or in-memory)
 * 2. Create `AppState` (store, token service, config)
 * 3. Create the router with all routes and middleware
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::AppState;
use crate::backend::store::{Store, StoreError};
use crate::shared::AppConfig;

/// Create and configure the application from `config`.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, StoreError> {
    tracing::info!("Initializing parley server");

    let store = load_store(&config).await?;
    let app = app_with_store(store, config);

    tracing::info!("Router configured");
    Ok(app)
}

/// Create the application around an already-built store.
pub fn app_with_store(store: Arc<dyn Store>, config: AppConfig) -> Router<()> {
    create_router(AppState::new(store, config))
}
