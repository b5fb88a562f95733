//! Messaging Module
//!
//! Data structures for direct messages and the friend index:
//!
//! - `Message` - A direct message between two accounts
//! - `FriendPair` - A canonical, unordered friendship edge
//!
//! # Usage
//!
//! ```rust
//! use parley::shared::messaging::{Message, FriendPair};
//! ```

pub mod friend;
pub mod message;

pub use friend::FriendPair;
pub use message::{
    GetMessagesQuery, GetMessagesResponse, Message, SendMessageByIdRequest,
    SendMessageByPhoneNumberRequest, UpdateMessageRequest,
};
