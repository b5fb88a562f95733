/**
 * API Routes
 *
 * ## Public
 * - `POST /create-account` - Register an account
 * - `POST /login` - Log in
 *
 * ## Authenticated (bearer token)
 * - `POST /message/sendById` - Send a message to an account id
 * - `POST /message/sendByPhoneNumber` - Send a message to a phone number
 * - `GET /message/{id}` - Read a message (sender or recipient)
 * - `PUT /message/{id}` - Edit a message (sender only)
 * - `DELETE /message/{id}` - Delete a message (sender only)
 * - `GET /messages` - Page through messages between two accounts
 * - `GET /friends` - List the caller's friends
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{create_account, login};
use crate::backend::messaging::{
    delete_message, get_friends, get_message, get_messages, send_message_by_id,
    send_message_by_phone_number, update_message,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Add the public and authenticated API routes to `router`.
///
/// The auth middleware is applied with `route_layer`, so it only runs for
/// requests that matched one of the protected routes; unknown paths still
/// reach the fallback.
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let protected: Router<AppState> = Router::new()
        .route("/message/sendById", post(send_message_by_id))
        .route(
            "/message/sendByPhoneNumber",
            post(send_message_by_phone_number),
        )
        .route(
            "/message/{id}",
            get(get_message).put(update_message).delete(delete_message),
        )
        .route("/messages", get(get_messages))
        .route("/friends", get(get_friends))
        .route_layer(from_fn_with_state(app_state, auth_middleware));

    router
        .route("/create-account", post(create_account))
        .route("/login", post(login))
        .merge(protected)
}
