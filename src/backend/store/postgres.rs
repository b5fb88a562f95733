//! PostgreSQL store
//!
//! Every operation is bounded by the configured store timeout. Most are a
//! single statement; `send_message` writes the message and the friend edge
//! in one transaction. Ownership checks on update/delete are folded into the statement's
//! `WHERE` clause; only when no row is affected is a second query issued to
//! tell a missing message apart from someone else's.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use std::future::Future;
use std::time::Duration;
use uuid::Uuid;

use super::{page_offset, CredentialStore, FriendStore, MessageStore, StoreError};
use crate::backend::auth::users::Account;
use crate::shared::messaging::{FriendPair, Message};
use crate::shared::{AppConfig, User};

const MESSAGE_COLUMNS: &str = "id, content, sender_id, recipient_id, created_at";

const INSERT_FRIEND: &str = r#"
    INSERT INTO friends (account_id1, account_id2)
    VALUES ($1, $2)
    ON CONFLICT DO NOTHING
"#;

fn insert_message_sql() -> String {
    format!(
        "INSERT INTO messages (id, content, sender_id, recipient_id, created_at) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        MESSAGE_COLUMNS
    )
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Open a connection pool sized and bounded by `config`.
    pub async fn connect(database_url: &str, config: &AppConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(config.store_timeout())
            .connect(database_url)
            .await?;
        Ok(Self::new(pool, config.store_timeout()))
    }

    /// Apply the embedded migrations in `migrations/`.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn bounded<T, F>(&self, query: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.timeout, query).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }

    async fn message_exists(&self, message_id: Uuid) -> Result<bool, StoreError> {
        self.bounded(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM messages WHERE id = $1)")
                .bind(message_id)
                .fetch_one(&self.pool),
        )
        .await
    }

    /// Explain why a conditional update/delete touched no row.
    async fn classify_miss(&self, message_id: Uuid) -> StoreError {
        match self.message_exists(message_id).await {
            Ok(true) => StoreError::Unauthorized,
            Ok(false) => StoreError::NotFound,
            Err(err) => err,
        }
    }
}

fn message_from_row(row: &PgRow) -> Result<Message, sqlx::Error> {
    Ok(Message {
        id: row.try_get("id")?,
        content: row.try_get("content")?,
        from: row.try_get("sender_id")?,
        to: row.try_get("recipient_id")?,
        timestamp: row.try_get("created_at")?,
    })
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        phone_number: row.try_get("phone_number")?,
    })
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn create_account(
        &self,
        name: &str,
        phone_number: i64,
        password_hash: &str,
    ) -> Result<Account, StoreError> {
        let result = self
            .bounded(
                sqlx::query_as::<_, Account>(
                    r#"
                    INSERT INTO accounts (id, name, phone_number, password_hash)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, name, phone_number, password_hash
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(name)
                .bind(phone_number)
                .bind(password_hash)
                .fetch_one(&self.pool),
            )
            .await;

        match result {
            Err(StoreError::Database(sqlx::Error::Database(db_err)))
                if db_err.is_unique_violation() =>
            {
                Err(StoreError::DuplicatePhone)
            }
            other => other,
        }
    }

    async fn fetch_account_by_phone(&self, phone_number: i64) -> Result<Account, StoreError> {
        self.bounded(
            sqlx::query_as::<_, Account>(
                r#"
                SELECT id, name, phone_number, password_hash
                FROM accounts
                WHERE phone_number = $1
                "#,
            )
            .bind(phone_number)
            .fetch_optional(&self.pool),
        )
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn account_exists(&self, id: Uuid) -> Result<bool, StoreError> {
        self.bounded(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool),
        )
        .await
    }

    async fn resolve_id_by_phone(&self, phone_number: i64) -> Result<Uuid, StoreError> {
        self.bounded(
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM accounts WHERE phone_number = $1")
                .bind(phone_number)
                .fetch_optional(&self.pool),
        )
        .await?
        .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl MessageStore for PgStore {
    async fn add_message(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        content: &str,
    ) -> Result<Message, StoreError> {
        if content.trim().is_empty() {
            return Err(StoreError::EmptyContent);
        }
        let message = Message::new(sender_id, recipient_id, content);

        let sql = insert_message_sql();
        let row = self
            .bounded(
                sqlx::query(&sql)
                    .bind(message.id)
                    .bind(&message.content)
                    .bind(message.from)
                    .bind(message.to)
                    .bind(message.timestamp)
                    .fetch_one(&self.pool),
            )
            .await?;

        Ok(message_from_row(&row)?)
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
        let message = Message::new(sender_id, recipient_id, content);
        let sql = insert_message_sql();
        let pool = &self.pool;

        let row = self
            .bounded(async {
                let mut tx = pool.begin().await?;
                let row = sqlx::query(&sql)
                    .bind(message.id)
                    .bind(&message.content)
                    .bind(message.from)
                    .bind(message.to)
                    .bind(message.timestamp)
                    .fetch_one(&mut *tx)
                    .await?;

                if sender_id != recipient_id {
                    let pair = FriendPair::new(sender_id, recipient_id);
                    sqlx::query(INSERT_FRIEND)
                        .bind(pair.first())
                        .bind(pair.second())
                        .execute(&mut *tx)
                        .await?;
                }

                tx.commit().await?;
                Ok::<_, sqlx::Error>(row)
            })
            .await?;

        Ok(message_from_row(&row)?)
    }

    async fn get_message(
        &self,
        requester_id: Uuid,
        message_id: Uuid,
    ) -> Result<Message, StoreError> {
        let sql = format!("SELECT {} FROM messages WHERE id = $1", MESSAGE_COLUMNS);
        let row = self
            .bounded(sqlx::query(&sql).bind(message_id).fetch_optional(&self.pool))
            .await?
            .ok_or(StoreError::NotFound)?;

        let message = message_from_row(&row)?;
        if !message.involves(requester_id) {
            return Err(StoreError::Unauthorized);
        }
        Ok(message)
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

        let sql = format!(
            "UPDATE messages SET content = $1 WHERE id = $2 AND sender_id = $3 RETURNING {}",
            MESSAGE_COLUMNS
        );
        let row = self
            .bounded(
                sqlx::query(&sql)
                    .bind(new_content)
                    .bind(message_id)
                    .bind(requester_id)
                    .fetch_optional(&self.pool),
            )
            .await?;

        match row {
            Some(row) => Ok(message_from_row(&row)?),
            None => Err(self.classify_miss(message_id).await),
        }
    }

    async fn delete_message(
        &self,
        requester_id: Uuid,
        message_id: Uuid,
    ) -> Result<(), StoreError> {
        let result = self
            .bounded(
                sqlx::query("DELETE FROM messages WHERE id = $1 AND sender_id = $2")
                    .bind(message_id)
                    .bind(requester_id)
                    .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(self.classify_miss(message_id).await);
        }
        Ok(())
    }

    async fn get_messages(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Message>, StoreError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM messages
            WHERE sender_id = $1 AND recipient_id = $2
            ORDER BY created_at DESC, seq DESC
            LIMIT $3 OFFSET $4
            "#,
            MESSAGE_COLUMNS
        );
        let rows = self
            .bounded(
                sqlx::query(&sql)
                    .bind(sender_id)
                    .bind(recipient_id)
                    .bind(i64::from(page_size))
                    .bind(page_offset(page, page_size))
                    .fetch_all(&self.pool),
            )
            .await?;

        rows.iter()
            .map(|row| message_from_row(row).map_err(StoreError::from))
            .collect()
    }
}

#[async_trait]
impl FriendStore for PgStore {
    async fn add_friend(&self, a: Uuid, b: Uuid) -> Result<(), StoreError> {
        let pair = FriendPair::new(a, b);
        self.bounded(
            sqlx::query(INSERT_FRIEND)
                .bind(pair.first())
                .bind(pair.second())
                .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn get_friends(&self, id: Uuid) -> Result<Vec<User>, StoreError> {
        let rows = self
            .bounded(
                sqlx::query(
                    r#"
                    SELECT a.id, a.name, a.phone_number
                    FROM friends f
                    JOIN accounts a ON a.id = f.account_id2
                    WHERE f.account_id1 = $1
                    UNION
                    SELECT a.id, a.name, a.phone_number
                    FROM friends f
                    JOIN accounts a ON a.id = f.account_id1
                    WHERE f.account_id2 = $1
                    ORDER BY name, id
                    "#,
                )
                .bind(id)
                .fetch_all(&self.pool),
            )
            .await?;

        rows.iter()
            .map(|row| user_from_row(row).map_err(StoreError::from))
            .collect()
    }
}
