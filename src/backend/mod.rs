//! Backend Module
//!
//! The HTTP server: account registration and login, bearer-token
//! authentication, direct messages and the friend index.
//!
//! # Architecture
//!
//! - **`server`** - application state, store selection, app creation
//! - **`routes`** - route configuration and router assembly
//! - **`auth`** - accounts, password hashing, JWTs, auth handlers
//! - **`middleware`** - bearer-token authentication
//! - **`messaging`** - message and friend handlers
//! - **`store`** - persistence traits with PostgreSQL and in-memory backends
//! - **`extract`** - validating JSON and query extractors
//! - **`error`** - backend error types and their JSON responses
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - State and initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── messaging/      - Messaging handlers
//! ├── store/          - Persistence
//! ├── extract.rs      - Validating extractors
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! 1. `TraceLayer` opens a span for the request
//! 2. Protected routes pass through `auth_middleware`, which binds
//!    `AuthenticatedUser`
//! 3. Extractors deserialize and validate input
//! 4. The handler calls the store through `Arc<dyn Store>`
//! 5. Errors become `{"error", "status"}` JSON bodies

/// Server setup and state
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and account management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Messaging and friend handlers
pub mod messaging;

/// Persistence
pub mod store;

/// Validating extractors
pub mod extract;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use server::{create_app, AppState};
pub use store::{MemoryStore, PgStore, Store, StoreError};
