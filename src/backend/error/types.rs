/**
 * Backend Error Types
 *
 * This module defines the error taxonomy of the HTTP layer. Every handler
 * and the auth middleware return `BackendError`, which maps one-to-one onto
 * a response status.
 *
 * # Error Categories
 *
 * - `ValidationError` - malformed or missing input (400)
 * - `Unauthenticated` - missing, invalid or expired token, or the token's
 *   account no longer exists (401)
 * - `Unauthorized` - authenticated but not permitted on this resource (403)
 * - `NotFound` - resource absent (404)
 * - `Conflict` - duplicate unique key such as a phone number (409)
 * - `Internal` - unexpected backend failure (500)
 *
 * Internal failures keep their detail for the logs; clients only ever see
 * a generic message.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Message sent to clients for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum BackendError {
    /// Malformed or missing input
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    /// The caller could not be identified
    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    /// The caller is known but may not touch this resource
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Unexpected failure. `message` is for the logs only.
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Input rejected before reaching a store
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::Unauthorized { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the message that is safe to show a client
    pub fn message(&self) -> String {
        match self {
            Self::ValidationError { message }
            | Self::Unauthenticated { message }
            | Self::Unauthorized { message }
            | Self::NotFound { message }
            | Self::Conflict { message } => message.clone(),
            Self::Internal { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
            Self::SharedError(err) => err.to_string(),
        }
    }
}

/// Fallback classification for store failures. Call sites that know what
/// they were looking up map `NotFound`/`Unauthorized` themselves first.
impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::not_found("Not found"),
            StoreError::Unauthorized => Self::unauthorized("Not permitted"),
            StoreError::DuplicatePhone => Self::conflict("Phone number is already registered"),
            StoreError::EmptyContent => Self::validation("Message content must not be empty"),
            other => {
                tracing::error!("Store failure: {}", other);
                Self::internal(other.to_string())
            }
        }
    }
}
