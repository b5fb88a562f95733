/**
 * Application State Management
 *
 * `AppState` is the single state container handed to the router. It holds
 * the store backend behind `Arc<dyn Store>`, the token service and the
 * loaded configuration. Nothing in it is mutated after startup; the store
 * does its own synchronization.
 *
 * The `FromRef` implementations let handlers extract just the part they
 * need, e.g. `State(store): State<Arc<dyn Store>>`.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::sessions::TokenService;
use crate::backend::store::Store;
use crate::shared::AppConfig;

#[derive(Clone)]
pub struct AppState {
    /// Persistence backend (PostgreSQL or in-memory)
    pub store: Arc<dyn Store>,

    /// Bearer token issuance and verification
    pub tokens: Arc<TokenService>,

    /// Loaded configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.token_ttl());
        Self {
            store,
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for Arc<dyn Store> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
