//! In-memory store
//!
//! Used when no `DATABASE_URL` is configured and as the backend of the test
//! suite. All tables sit behind a single `RwLock`, so every operation sees
//! and leaves a consistent state, the same way a single SQL statement would.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{page_offset, CredentialStore, FriendStore, MessageStore, StoreError};
use crate::backend::auth::users::Account;
use crate::shared::messaging::{FriendPair, Message};
use crate::shared::User;

#[derive(Debug)]
struct StoredMessage {
    /// Insertion order, breaks timestamp ties
    seq: u64,
    message: Message,
}

#[derive(Debug, Default)]
struct Tables {
    accounts: HashMap<Uuid, Account>,
    phone_index: HashMap<i64, Uuid>,
    messages: HashMap<Uuid, StoredMessage>,
    next_seq: u64,
    friends: BTreeSet<FriendPair>,
}

impl Tables {
    fn insert_message(&mut self, sender_id: Uuid, recipient_id: Uuid, content: &str) -> Message {
        let message = Message::new(sender_id, recipient_id, content);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.messages.insert(
            message.id,
            StoredMessage {
                seq,
                message: message.clone(),
            },
        );
        message
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored friend edges
    pub async fn friend_edge_count(&self) -> usize {
        self.tables.read().await.friends.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn create_account(
        &self,
        name: &str,
        phone_number: i64,
        password_hash: &str,
    ) -> Result<Account, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.phone_index.contains_key(&phone_number) {
            return Err(StoreError::DuplicatePhone);
        }

        let account = Account {
            id: Uuid::new_v4(),
            name: name.to_string(),
            phone_number,
            password_hash: password_hash.to_string(),
        };
        tables.phone_index.insert(phone_number, account.id);
        tables.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn fetch_account_by_phone(&self, phone_number: i64) -> Result<Account, StoreError> {
        let tables = self.tables.read().await;
        tables
            .phone_index
            .get(&phone_number)
            .and_then(|id| tables.accounts.get(id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn account_exists(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.accounts.contains_key(&id))
    }

    async fn resolve_id_by_phone(&self, phone_number: i64) -> Result<Uuid, StoreError> {
        self.tables
            .read()
            .await
            .phone_index
            .get(&phone_number)
            .copied()
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn add_message(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        content: &str,
    ) -> Result<Message, StoreError> {
        if content.trim().is_empty() {
            return Err(StoreError::EmptyContent);
        }

        let mut tables = self.tables.write().await;
        Ok(tables.insert_message(sender_id, recipient_id, content))
    }

    async fn send_message(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        content: &str,
    ) -> Result<Message, StoreError> {
        if content.trim().is_empty() {
            return Err(StoreError::EmptyContent);
        }

        let mut tables = self.tables.write().await;
        let message = tables.insert_message(sender_id, recipient_id, content);
        if sender_id != recipient_id {
            tables.friends.insert(FriendPair::new(sender_id, recipient_id));
        }
        Ok(message)
    }

    async fn get_message(
        &self,
        requester_id: Uuid,
        message_id: Uuid,
    ) -> Result<Message, StoreError> {
        let tables = self.tables.read().await;
        let stored = tables.messages.get(&message_id).ok_or(StoreError::NotFound)?;
        if !stored.message.involves(requester_id) {
            return Err(StoreError::Unauthorized);
        }
        Ok(stored.message.clone())
    }

    async fn update_message(
        &self,
        requester_id: Uuid,
        message_id: Uuid,
        new_content: &str,
    ) -> Result<Message, StoreError> {
        if new_content.trim().is_empty() {
            return Err(StoreError::EmptyContent);
        }

        let mut tables = self.tables.write().await;
        let stored = tables
            .messages
            .get_mut(&message_id)
            .ok_or(StoreError::NotFound)?;
        if stored.message.from != requester_id {
            return Err(StoreError::Unauthorized);
        }
        stored.message.content = new_content.to_string();
        Ok(stored.message.clone())
    }

    async fn delete_message(
        &self,
        requester_id: Uuid,
        message_id: Uuid,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let sender = tables
            .messages
            .get(&message_id)
            .map(|stored| stored.message.from)
            .ok_or(StoreError::NotFound)?;
        if sender != requester_id {
            return Err(StoreError::Unauthorized);
        }
        tables.messages.remove(&message_id);
        Ok(())
    }

    async fn get_messages(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Message>, StoreError> {
        let tables = self.tables.read().await;
        let mut matching: Vec<&StoredMessage> = tables
            .messages
            .values()
            .filter(|stored| stored.message.from == sender_id && stored.message.to == recipient_id)
            .collect();
        matching.sort_by(|a, b| {
            b.message
                .timestamp
                .cmp(&a.message.timestamp)
                .then(b.seq.cmp(&a.seq))
        });

        let offset = usize::try_from(page_offset(page, page_size)).unwrap_or(usize::MAX);
        Ok(matching
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .map(|stored| stored.message.clone())
            .collect())
    }
}

#[async_trait]
impl FriendStore for MemoryStore {
    async fn add_friend(&self, a: Uuid, b: Uuid) -> Result<(), StoreError> {
        self.tables.write().await.friends.insert(FriendPair::new(a, b));
        Ok(())
    }

    async fn get_friends(&self, id: Uuid) -> Result<Vec<User>, StoreError> {
        let tables = self.tables.read().await;
        let mut friends: Vec<User> = tables
            .friends
            .iter()
            .filter_map(|pair| pair.other(id))
            .collect::<BTreeSet<Uuid>>()
            .into_iter()
            .filter_map(|friend_id| tables.accounts.get(&friend_id))
            .map(Account::to_user)
            .collect();
        friends.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(friends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    async fn account(store: &MemoryStore, name: &str, phone: i64) -> Account {
        store.create_account(name, phone, "hash").await.unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_phone_rejected() {
        let store = MemoryStore::new();
        let first = store.create_account("Ann", 5551234567, "hash").await;
        assert!(first.is_ok());

        let second = store.create_account("Bob", 5551234567, "hash").await;
        assert_matches!(second, Err(StoreError::DuplicatePhone));
    }

    #[tokio::test]
    async fn test_account_lookups() {
        let store = MemoryStore::new();
        let ann = account(&store, "Ann", 5551234567).await;

        let fetched = store.fetch_account_by_phone(5551234567).await.unwrap();
        assert_eq!(fetched.id, ann.id);
        assert_eq!(fetched.password_hash, "hash");
        assert_eq!(store.resolve_id_by_phone(5551234567).await.unwrap(), ann.id);
        assert!(store.account_exists(ann.id).await.unwrap());
        assert!(!store.account_exists(Uuid::new_v4()).await.unwrap());
        assert_matches!(
            store.fetch_account_by_phone(5550000000).await,
            Err(StoreError::NotFound)
        );
        assert_matches!(
            store.resolve_id_by_phone(5550000000).await,
            Err(StoreError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_add_then_get_round_trip() {
        let store = MemoryStore::new();
        let (ann, bob) = (Uuid::new_v4(), Uuid::new_v4());

        let sent = store.add_message(ann, bob, "hello").await.unwrap();
        let by_sender = store.get_message(ann, sent.id).await.unwrap();
        let by_recipient = store.get_message(bob, sent.id).await.unwrap();

        assert_eq!(by_sender, sent);
        assert_eq!(by_recipient, sent);
    }

    #[tokio::test]
    async fn test_empty_content_rejected() {
        let store = MemoryStore::new();
        let result = store.add_message(Uuid::new_v4(), Uuid::new_v4(), "  ").await;
        assert_matches!(result, Err(StoreError::EmptyContent));
    }

    #[tokio::test]
    async fn test_get_by_stranger_unauthorized() {
        let store = MemoryStore::new();
        let sent = store
            .add_message(Uuid::new_v4(), Uuid::new_v4(), "hello")
            .await
            .unwrap();

        assert_matches!(
            store.get_message(Uuid::new_v4(), sent.id).await,
            Err(StoreError::Unauthorized)
        );
    }

    #[tokio::test]
    async fn test_missing_message_is_not_found_for_everyone() {
        let store = MemoryStore::new();
        let stranger = Uuid::new_v4();
        let missing = Uuid::new_v4();

        assert_matches!(store.get_message(stranger, missing).await, Err(StoreError::NotFound));
        assert_matches!(
            store.update_message(stranger, missing, "new").await,
            Err(StoreError::NotFound)
        );
        assert_matches!(
            store.delete_message(stranger, missing).await,
            Err(StoreError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_update_only_by_sender() {
        let store = MemoryStore::new();
        let (ann, bob) = (Uuid::new_v4(), Uuid::new_v4());
        let sent = store.add_message(ann, bob, "hello").await.unwrap();

        assert_matches!(
            store.update_message(bob, sent.id, "edited by bob").await,
            Err(StoreError::Unauthorized)
        );

        let updated = store.update_message(ann, sent.id, "edited").await.unwrap();
        assert_eq!(updated.content, "edited");
        assert_eq!(updated.timestamp, sent.timestamp);
        assert_eq!(updated.id, sent.id);
        assert_eq!(store.get_message(bob, sent.id).await.unwrap().content, "edited");
    }

    #[tokio::test]
    async fn test_delete_only_by_sender() {
        let store = MemoryStore::new();
        let (ann, bob) = (Uuid::new_v4(), Uuid::new_v4());
        let sent = store.add_message(ann, bob, "hello").await.unwrap();

        assert_matches!(
            store.delete_message(bob, sent.id).await,
            Err(StoreError::Unauthorized)
        );
        store.delete_message(ann, sent.id).await.unwrap();
        assert_matches!(store.get_message(ann, sent.id).await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_pagination_is_directional_and_descending() {
        let store = MemoryStore::new();
        let (ann, bob) = (Uuid::new_v4(), Uuid::new_v4());
        for i in 0..7 {
            store.add_message(ann, bob, &format!("m{}", i)).await.unwrap();
        }
        store.add_message(bob, ann, "reply").await.unwrap();

        let page1 = store.get_messages(ann, bob, 1, 5).await.unwrap();
        let page2 = store.get_messages(ann, bob, 2, 5).await.unwrap();
        let page3 = store.get_messages(ann, bob, 3, 5).await.unwrap();

        let contents: Vec<&str> = page1.iter().chain(page2.iter()).map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m6", "m5", "m4", "m3", "m2", "m1", "m0"]);
        assert_eq!(page1.len(), 5);
        assert_eq!(page2.len(), 2);
        assert!(page3.is_empty());

        let reverse = store.get_messages(bob, ann, 1, 5).await.unwrap();
        assert_eq!(reverse.len(), 1);
        assert_eq!(reverse[0].content, "reply");
    }

    #[tokio::test]
    async fn test_friend_edges_are_canonical() {
        let store = MemoryStore::new();
        let ann = account(&store, "Ann", 5551234567).await;
        let bob = account(&store, "Bob", 5557654321).await;

        store.add_friend(ann.id, bob.id).await.unwrap();
        store.add_friend(bob.id, ann.id).await.unwrap();
        store.add_friend(ann.id, bob.id).await.unwrap();

        assert_eq!(store.friend_edge_count().await, 1);
        assert_eq!(store.get_friends(ann.id).await.unwrap(), vec![bob.to_user()]);
        assert_eq!(store.get_friends(bob.id).await.unwrap(), vec![ann.to_user()]);
    }

    #[tokio::test]
    async fn test_send_message_stores_message_and_edge() {
        let store = MemoryStore::new();
        let ann = account(&store, "Ann", 5551234567).await;
        let bob = account(&store, "Bob", 5557654321).await;

        let sent = store.send_message(ann.id, bob.id, "hi").await.unwrap();
        assert_eq!(store.get_message(bob.id, sent.id).await.unwrap(), sent);
        assert_eq!(store.get_friends(bob.id).await.unwrap(), vec![ann.to_user()]);

        store.send_message(bob.id, ann.id, "hey").await.unwrap();
        assert_eq!(store.friend_edge_count().await, 1);
    }

    #[tokio::test]
    async fn test_send_message_rejected_leaves_nothing() {
        let store = MemoryStore::new();
        let ann = account(&store, "Ann", 5551234567).await;
        let bob = account(&store, "Bob", 5557654321).await;

        let result = store.send_message(ann.id, bob.id, "   ").await;
        assert_matches!(result, Err(StoreError::EmptyContent));
        assert!(store.get_messages(ann.id, bob.id, 1, 5).await.unwrap().is_empty());
        assert_eq!(store.friend_edge_count().await, 0);
    }

    #[tokio::test]
    async fn test_send_message_to_self_adds_no_edge() {
        let store = MemoryStore::new();
        let ann = account(&store, "Ann", 5551234567).await;

        store.send_message(ann.id, ann.id, "note").await.unwrap();
        assert_eq!(store.get_messages(ann.id, ann.id, 1, 5).await.unwrap().len(), 1);
        assert_eq!(store.friend_edge_count().await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_add_friend_single_edge() {
        let store = MemoryStore::new();
        let ann = account(&store, "Ann", 5551234567).await;
        let bob = account(&store, "Bob", 5557654321).await;

        let mut tasks = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            let (a, b) = if i % 2 == 0 { (ann.id, bob.id) } else { (bob.id, ann.id) };
            tasks.push(tokio::spawn(async move { store.add_friend(a, b).await }));
        }
        for task in futures_util::future::join_all(tasks).await {
            assert!(task.unwrap().is_ok());
        }

        assert_eq!(store.friend_edge_count().await, 1);
        let friends = store.get_friends(ann.id).await.unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].id, bob.id);
    }

    #[tokio::test]
    async fn test_get_friends_sorted_by_name() {
        let store = MemoryStore::new();
        let ann = account(&store, "Ann", 5551234567).await;
        let zed = account(&store, "Zed", 5551111111).await;
        let bob = account(&store, "Bob", 5552222222).await;

        store.add_friend(zed.id, ann.id).await.unwrap();
        store.add_friend(ann.id, bob.id).await.unwrap();

        let names: Vec<String> = store
            .get_friends(ann.id)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Bob".to_string(), "Zed".to_string()]);
        assert!(store.get_friends(Uuid::new_v4()).await.unwrap().is_empty());
    }
}
