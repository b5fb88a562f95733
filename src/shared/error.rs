//! Shared Error Types
//!
//! Rejections raised by `Validate` implementations before a request reaches
//! any store. The backend turns them into `400 Bad Request`.
//!
//! ```rust
//! use parley::shared::error::SharedError;
//!
//! let error = SharedError::validation("content", "must not be empty");
//! assert_eq!(error.to_string(), "Invalid content: must not be empty");
//! ```
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A request field broke one of its rules
    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },
}

impl SharedError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}
