/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the create-account and login
 * handlers. Field names are camelCase on the wire.
 */

use serde::{Deserialize, Serialize};

use crate::shared::validation::{self, Validate};
use crate::shared::{SharedError, User};

/// Create account request
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// Display name, 1 to 100 characters
    pub name: String,
    /// Ten digit phone number, unique per account
    pub phone_number: i64,
    /// Plaintext password, hashed before storage
    pub password: String,
}

impl Validate for CreateAccountRequest {
    fn validate(&self) -> Result<(), SharedError> {
        validation::name("name", &self.name)?;
        validation::phone_number("phoneNumber", self.phone_number)?;
        validation::password("password", &self.password)
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub phone_number: i64,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), SharedError> {
        validation::phone_number("phoneNumber", self.phone_number)?;
        validation::non_empty("password", &self.password)
    }
}

/// Auth response
///
/// Returned by create-account and login: the public account view plus a
/// fresh bearer token.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}
