/**
 * Login Handler
 *
 * POST /login
 *
 * Looks the account up by phone number, checks the password against the
 * stored bcrypt hash and returns a fresh bearer token.
 *
 * # Errors
 *
 * * `400 Bad Request` - invalid input
 * * `401 Unauthorized` - "User does not exist" or "Invalid password"
 * * `500 Internal Server Error` - storage, bcrypt or signing failure
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::password::verify_password;
use crate::backend::error::BackendError;
use crate::backend::extract::ValidatedJson;
use crate::backend::server::state::AppState;
use crate::backend::store::{CredentialStore, StoreError};

pub async fn login(
    State(app_state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Login request for phone number: {}", request.phone_number);

    let account = app_state
        .store
        .fetch_account_by_phone(request.phone_number)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => {
                tracing::warn!("User not found: {}", request.phone_number);
                BackendError::unauthenticated("User does not exist")
            }
            other => BackendError::from(other),
        })?;

    let valid = verify_password(request.password, account.password_hash.clone())
        .await
        .map_err(|e| {
            tracing::error!("Password verification error: {}", e);
            BackendError::internal(e.to_string())
        })?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", account.id);
        return Err(BackendError::unauthenticated("Invalid password"));
    }

    let token = app_state.tokens.issue(account.id).map_err(|e| {
        tracing::error!("Failed to create token: {}", e);
        BackendError::internal(e.to_string())
    })?;

    tracing::info!("User logged in: {}", account.id);

    Ok(Json(AuthResponse {
        user: account.into(),
        token,
    }))
}
