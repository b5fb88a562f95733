//! Store Module
//!
//! Persistence capabilities of the server, one trait per owner of a table:
//!
//! - **`CredentialStore`** - accounts (identity + password hash)
//! - **`MessageStore`** - direct messages, with ownership checks
//! - **`FriendStore`** - the canonical friend-pair index
//!
//! `Store` bundles all three. Two implementations exist: `PgStore`
//! (PostgreSQL through `sqlx`) and `MemoryStore`. One is built at startup
//! and shared through `AppState` as `Arc<dyn Store>`.
//!
//! # Authorization inside the store
//!
//! `get_message`, `update_message` and `delete_message` take the requester's
//! id and enforce the ownership rules themselves:
//!
//! | Operation | Allowed actor       |
//! |-----------|---------------------|
//! | read      | sender or recipient |
//! | update    | sender only         |
//! | delete    | sender only         |
//!
//! A missing message is always reported as `NotFound`, never as
//! `Unauthorized`.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::users::Account;
use crate::shared::messaging::Message;
use crate::shared::User;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("requester is not permitted to access this record")]
    Unauthorized,

    #[error("phone number is already registered")]
    DuplicatePhone,

    #[error("message content must not be empty")]
    EmptyContent,

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new account. Fails with `DuplicatePhone` when the phone
    /// number's uniqueness constraint rejects the row.
    async fn create_account(
        &self,
        name: &str,
        phone_number: i64,
        password_hash: &str,
    ) -> Result<Account, StoreError>;

    async fn fetch_account_by_phone(&self, phone_number: i64) -> Result<Account, StoreError>;

    async fn account_exists(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn resolve_id_by_phone(&self, phone_number: i64) -> Result<Uuid, StoreError>;
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a new message, generating its id and timestamp now.
    async fn add_message(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        content: &str,
    ) -> Result<Message, StoreError>;

    /// Persist a message and record sender and recipient as friends in one
    /// step: either both writes land or neither does. A self-message adds
    /// no friend edge.
    async fn send_message(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        content: &str,
    ) -> Result<Message, StoreError>;

    async fn get_message(&self, requester_id: Uuid, message_id: Uuid)
        -> Result<Message, StoreError>;

    /// Replace the content of a message the requester sent. The timestamp
    /// is left as it was.
    async fn update_message(
        &self,
        requester_id: Uuid,
        message_id: Uuid,
        new_content: &str,
    ) -> Result<Message, StoreError>;

    async fn delete_message(&self, requester_id: Uuid, message_id: Uuid)
        -> Result<(), StoreError>;

    /// One page of messages sent from `sender_id` to `recipient_id`, most
    /// recent first. Pages start at 1.
    async fn get_messages(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Message>, StoreError>;
}

#[async_trait]
pub trait FriendStore: Send + Sync {
    /// Record that `a` and `b` are friends. Idempotent in both orders.
    async fn add_friend(&self, a: Uuid, b: Uuid) -> Result<(), StoreError>;

    async fn get_friends(&self, id: Uuid) -> Result<Vec<User>, StoreError>;
}

/// Everything the server needs from persistence
pub trait Store: CredentialStore + MessageStore + FriendStore {}

impl<T> Store for T where T: CredentialStore + MessageStore + FriendStore {}

/// Row offset of a 1-indexed page. Page 0 is treated as page 1.
pub fn page_offset(page: u32, page_size: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(page_size)
}
