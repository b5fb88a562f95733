//! Messaging HTTP Handlers
//!
//! Direct messages and the friend list. Every handler here sits behind
//! `auth_middleware` and receives the caller through `AuthUser`.
//!
//! Sending a message to someone makes the two accounts friends. The store
//! records the message and the edge together; a self-message creates no edge.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::extract::{ValidatedJson, ValidatedQuery};
use crate::backend::middleware::AuthUser;
use crate::backend::store::{CredentialStore, FriendStore, MessageStore, Store, StoreError};
use crate::shared::messaging::{
    GetMessagesQuery, GetMessagesResponse, Message, SendMessageByIdRequest,
    SendMessageByPhoneNumberRequest, UpdateMessageRequest,
};
use crate::shared::{AppConfig, User};

fn parse_message_id(raw: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| {
        tracing::warn!("Invalid message id: {}", raw);
        BackendError::validation("Invalid message id")
    })
}

/// Classify a store failure on a single message.
fn message_error(message_id: Uuid, err: StoreError) -> BackendError {
    match err {
        StoreError::NotFound => BackendError::not_found("Message not found"),
        StoreError::Unauthorized => {
            tracing::warn!("Denied access to message {}", message_id);
            BackendError::unauthorized("Not permitted to access this message")
        }
        other => BackendError::from(other),
    }
}

/// Store the message together with the sender/recipient friend edge.
async fn deliver(
    store: &dyn Store,
    sender_id: Uuid,
    recipient_id: Uuid,
    content: &str,
) -> Result<Message, BackendError> {
    let message = store.send_message(sender_id, recipient_id, content).await?;
    tracing::info!(
        "Message {} sent from {} to {}",
        message.id,
        sender_id,
        recipient_id
    );
    Ok(message)
}

/// POST /message/sendById
pub async fn send_message_by_id(
    State(store): State<Arc<dyn Store>>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<SendMessageByIdRequest>,
) -> Result<(StatusCode, Json<Message>), BackendError> {
    if !store.account_exists(request.recipient_id).await? {
        tracing::warn!("Recipient does not exist: {}", request.recipient_id);
        return Err(BackendError::not_found("Recipient does not exist"));
    }

    let message = deliver(
        store.as_ref(),
        user.user_id,
        request.recipient_id,
        &request.content,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// POST /message/sendByPhoneNumber
pub async fn send_message_by_phone_number(
    State(store): State<Arc<dyn Store>>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<SendMessageByPhoneNumberRequest>,
) -> Result<(StatusCode, Json<Message>), BackendError> {
    let recipient_id = store
        .resolve_id_by_phone(request.recipient_phone_number)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => {
                tracing::warn!(
                    "Recipient does not exist: {}",
                    request.recipient_phone_number
                );
                BackendError::not_found("Recipient does not exist")
            }
            other => BackendError::from(other),
        })?;

    let message = deliver(store.as_ref(), user.user_id, recipient_id, &request.content).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /message/{id}
pub async fn get_message(
    State(store): State<Arc<dyn Store>>,
    AuthUser(user): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Message>, BackendError> {
    let message_id = parse_message_id(&raw_id)?;
    let message = store
        .get_message(user.user_id, message_id)
        .await
        .map_err(|e| message_error(message_id, e))?;
    Ok(Json(message))
}

/// PUT /message/{id}
pub async fn update_message(
    State(store): State<Arc<dyn Store>>,
    AuthUser(user): AuthUser,
    Path(raw_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateMessageRequest>,
) -> Result<Json<Message>, BackendError> {
    let message_id = parse_message_id(&raw_id)?;
    let message = store
        .update_message(user.user_id, message_id, &request.content)
        .await
        .map_err(|e| message_error(message_id, e))?;

    tracing::info!("Message {} updated by {}", message_id, user.user_id);
    Ok(Json(message))
}

/// DELETE /message/{id}
pub async fn delete_message(
    State(store): State<Arc<dyn Store>>,
    AuthUser(user): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, BackendError> {
    let message_id = parse_message_id(&raw_id)?;
    store
        .delete_message(user.user_id, message_id)
        .await
        .map_err(|e| message_error(message_id, e))?;

    tracing::info!("Message {} deleted by {}", message_id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /messages?senderId=&recipientId=&page=
///
/// One page of the messages `senderId` sent to `recipientId`, newest
/// first. The caller must be one of the two.
pub async fn get_messages(
    State(store): State<Arc<dyn Store>>,
    State(config): State<Arc<AppConfig>>,
    AuthUser(user): AuthUser,
    ValidatedQuery(query): ValidatedQuery<GetMessagesQuery>,
) -> Result<Json<GetMessagesResponse>, BackendError> {
    if user.user_id != query.sender_id && user.user_id != query.recipient_id {
        tracing::warn!(
            "User {} requested history between {} and {}",
            user.user_id,
            query.sender_id,
            query.recipient_id
        );
        return Err(BackendError::unauthorized(
            "Not permitted to read this conversation",
        ));
    }

    let page_size = config.message_page_size;
    let messages = store
        .get_messages(query.sender_id, query.recipient_id, query.page, page_size)
        .await?;

    if messages.is_empty() {
        return Err(BackendError::not_found("No messages found"));
    }

    let last_page = messages.len() < page_size as usize;
    Ok(Json(GetMessagesResponse {
        page: query.page,
        last_page,
        messages,
    }))
}

/// GET /friends
pub async fn get_friends(
    State(store): State<Arc<dyn Store>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<User>>, BackendError> {
    let friends = store.get_friends(user.user_id).await?;
    if friends.is_empty() {
        return Err(BackendError::not_found("No friends found"));
    }
    Ok(Json(friends))
}
