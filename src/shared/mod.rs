//! Shared Module
//!
//! Types and data structures that do not depend on the server runtime:
//! wire formats, validation rules, configuration, and input errors.

/// Public account projection
pub mod account;

/// Application configuration
pub mod config;

/// Shared error types
pub mod error;

/// Message and friend types
pub mod messaging;

/// Request field validation
pub mod validation;

pub use account::User;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use validation::Validate;
