/**
 * Authentication Middleware
 *
 * Protects every route that requires a signed-in caller:
 *
 * 1. Extract the bearer token from the `Authorization` header
 * 2. Verify it with the `TokenService`
 * 3. Confirm the token's account still exists
 * 4. Attach `AuthenticatedUser` to the request extensions
 *
 * Handlers receive the caller through the `AuthUser` extractor. Any failure
 * short-circuits with 401 before the handler runs.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::TokenError;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::store::CredentialStore;

/// Identity bound to a request by `auth_middleware`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively; the value must be exactly a
/// scheme and a token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token)
}

pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        BackendError::unauthenticated("Missing bearer token")
    })?;

    let claims = app_state.tokens.verify(token).map_err(|e| match e {
        TokenError::Expired => {
            tracing::info!("Rejected expired token");
            BackendError::unauthenticated("Token has expired")
        }
        other => {
            tracing::warn!("Rejected token: {}", other);
            BackendError::unauthenticated("Invalid token")
        }
    })?;

    let exists = app_state.store.account_exists(claims.sub).await.map_err(|e| {
        tracing::error!("Failed to look up token subject {}: {}", claims.sub, e);
        BackendError::internal(e.to_string())
    })?;
    if !exists {
        tracing::warn!("Token subject no longer exists: {}", claims.sub);
        return Err(BackendError::unauthenticated("Account does not exist"));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.sub,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the caller bound by `auth_middleware`
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthenticated("Not authenticated")
            })?;

        Ok(AuthUser(user))
    }
}
