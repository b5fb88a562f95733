//! Authentication Module
//!
//! Account registration, login, password hashing and bearer tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - Account row and registration input
//! ├── password.rs     - bcrypt hashing on the blocking pool
//! ├── sessions.rs     - JWT issuance and verification
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - Account registration handler
//!     └── login.rs    - Login handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Create account**: name, phone number and password → account stored → token returned
//! 2. **Login**: phone number and password → hash verified → token returned
//! 3. **Protected routes**: `Authorization: Bearer <token>` → verified by
//!    `middleware::auth_middleware`
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt at the configured cost and never logged
//! - Tokens are HS256 JWTs with a configured lifetime (24 hours by default)
//! - Only the `User` projection is ever returned to clients

/// Account model
pub mod users;

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{create_account, login, AuthResponse, CreateAccountRequest, LoginRequest};
pub use sessions::{Claims, TokenError, TokenService};
pub use users::{Account, NewAccount};
