//! Server Module
//!
//! Everything needed to go from configuration to a running router.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Store backend selection
//! └── init.rs         - Application creation
//! ```
//!
//! # State Management
//!
//! `AppState` holds the store as `Arc<dyn Store>`, the token service and
//! the configuration. It is cloned into every request; handlers pick out
//! the pieces they need through `FromRef`.
//!
//! # Example
//!
//! ```rust,no_run
//! use parley::backend::server::create_app;
//! use parley::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Store backend selection
pub mod config;

/// Server initialization
pub mod init;

pub use init::{app_with_store, create_app};
pub use state::AppState;
