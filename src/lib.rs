//! Parley - Direct Messaging Backend
//!
//! An HTTP service for account registration and login, bearer-token
//! authenticated direct messages between accounts, paginated message
//! history, and a friend list derived from who has messaged whom.
//!
//! # Module Structure
//!
//! - **`shared`** - types that do not depend on the server runtime
//!   - `User`, `Message` and `FriendPair`
//!   - request/response bodies and their validation rules
//!   - `AppConfig` and error types
//!
//! - **`backend`** - the Axum server
//!   - auth handlers, JWT sessions, bcrypt password hashing
//!   - bearer-token middleware
//!   - message and friend handlers
//!   - `Store` traits with PostgreSQL and in-memory implementations
//!
//! # Usage
//!
//! ```rust,no_run
//! use parley::backend::server::create_app;
//! use parley::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::load()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for rejected input
//! - `backend::StoreError` for persistence failures
//! - `backend::BackendError` for HTTP responses

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
