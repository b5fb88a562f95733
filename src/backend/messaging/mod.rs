//! Messaging Module
//!
//! Handlers for sending, reading, editing and deleting direct messages,
//! paging through message history, and listing friends.

pub mod handlers;

pub use handlers::*;
