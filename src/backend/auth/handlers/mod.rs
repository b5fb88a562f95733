//! Authentication Handlers Module
//!
//! HTTP handlers for the public account endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - Account registration handler
//! └── login.rs    - Login handler
//! ```
//!
//! # Handlers
//!
//! - **`create_account`** - POST /create-account
//! - **`login`** - POST /login
//!
//! Both return `{user, token}`. Neither requires authentication.

/// Request and response types
pub mod types;

/// Account registration handler
pub mod signup;

/// Login handler
pub mod login;

pub use login::login;
pub use signup::create_account;
pub use types::{AuthResponse, CreateAccountRequest, LoginRequest};
