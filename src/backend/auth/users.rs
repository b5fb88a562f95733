/**
 * Account Model
 *
 * The stored account row, including the password hash, and the
 * hashed-but-not-yet-stored form used during registration. Only the public
 * `User` projection ever leaves the server.
 */

use uuid::Uuid;

use crate::backend::auth::password::{hash_password, PasswordError};
use crate::shared::User;

/// Account row as stored in the `accounts` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub phone_number: i64,
    /// bcrypt hash, never serialized
    pub password_hash: String,
}

impl Account {
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            phone_number: self.phone_number,
        }
    }
}

impl From<Account> for User {
    fn from(account: Account) -> Self {
        User {
            id: account.id,
            name: account.name,
            phone_number: account.phone_number,
        }
    }
}

/// Registration input after the password has been hashed
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub phone_number: i64,
    pub password_hash: String,
}

impl NewAccount {
    pub async fn new(
        name: String,
        phone_number: i64,
        password: String,
        cost: u32,
    ) -> Result<Self, PasswordError> {
        let password_hash = hash_password(password, cost).await?;
        Ok(Self {
            name,
            phone_number,
            password_hash,
        })
    }
}
