//! Message Data Structure
//!
//! Represents a single direct message between two accounts, plus the request
//! and response bodies of the messaging endpoints.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::validation::{self, Validate};

/// A direct message. `from` owns the message; only `content` ever changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub from: Uuid,
    pub to: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a fresh message with a new id, stamped now.
    pub fn new(from: Uuid, to: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            from,
            to,
            timestamp: now_micros(),
        }
    }

    /// Whether `user_id` took part in this message
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.from == user_id || self.to == user_id
    }
}

/// Current time at the precision Postgres `TIMESTAMPTZ` keeps, so a message
/// read back compares equal to the one that was written.
pub fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageByIdRequest {
    pub content: String,
    pub recipient_id: Uuid,
}

impl Validate for SendMessageByIdRequest {
    fn validate(&self) -> Result<(), SharedError> {
        validation::non_empty("content", &self.content)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageByPhoneNumberRequest {
    pub content: String,
    pub recipient_phone_number: i64,
}

impl Validate for SendMessageByPhoneNumberRequest {
    fn validate(&self) -> Result<(), SharedError> {
        validation::non_empty("content", &self.content)?;
        validation::phone_number("recipientPhoneNumber", self.recipient_phone_number)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMessageRequest {
    pub content: String,
}

impl Validate for UpdateMessageRequest {
    fn validate(&self) -> Result<(), SharedError> {
        validation::non_empty("content", &self.content)
    }
}

/// Query string of `GET /messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMessagesQuery {
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub page: u32,
}

impl Validate for GetMessagesQuery {
    fn validate(&self) -> Result<(), SharedError> {
        if self.page == 0 {
            return Err(SharedError::validation("page", "pages start at 1"));
        }
        Ok(())
    }
}

/// One page of message history, most recent first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetMessagesResponse {
    pub page: u32,
    pub last_page: bool,
    pub messages: Vec<Message>,
}
