/**
 * Router Configuration
 *
 * Assembles the API routes, the per-request tracing layer and a JSON 404
 * fallback into the router served by the binary.
 */

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), app_state.clone());

    let router = router.fallback(|| async { BackendError::not_found("Route not found") });

    router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
