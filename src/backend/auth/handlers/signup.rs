/**
 * Create Account Handler
 *
 * POST /create-account
 *
 * # Registration Process
 *
 * 1. Validate name, phone number and password (in the extractor)
 * 2. Hash the password with the configured bcrypt cost
 * 3. Insert the account; the phone number's unique constraint decides
 *    duplicates
 * 4. Issue a bearer token
 * 5. Return 201 with the public user and the token
 *
 * # Errors
 *
 * * `400 Bad Request` - invalid input
 * * `409 Conflict` - phone number already registered
 * * `500 Internal Server Error` - hashing, storage or signing failure
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, CreateAccountRequest};
use crate::backend::auth::users::NewAccount;
use crate::backend::error::BackendError;
use crate::backend::extract::ValidatedJson;
use crate::backend::server::state::AppState;
use crate::backend::store::{CredentialStore, StoreError};

pub async fn create_account(
    State(app_state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    tracing::info!("Create account request for phone number: {}", request.phone_number);

    let new_account = NewAccount::new(
        request.name,
        request.phone_number,
        request.password,
        app_state.config.bcrypt_cost,
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        BackendError::internal(e.to_string())
    })?;

    let account = app_state
        .store
        .create_account(
            &new_account.name,
            new_account.phone_number,
            &new_account.password_hash,
        )
        .await
        .map_err(|e| match e {
            StoreError::DuplicatePhone => {
                tracing::warn!("Phone number already registered: {}", new_account.phone_number);
                BackendError::conflict("Phone number already registered")
            }
            other => BackendError::from(other),
        })?;

    let token = app_state.tokens.issue(account.id).map_err(|e| {
        tracing::error!("Failed to create token: {}", e);
        BackendError::internal(e.to_string())
    })?;

    tracing::info!("Account created: {} ({})", account.id, account.phone_number);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: account.into(),
            token,
        }),
    ))
}
