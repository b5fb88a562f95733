//! Public account projection
//!
//! `User` is what clients see of an account. The password hash never leaves
//! the credential store, so it has no place here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub phone_number: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User {
            id: Uuid::nil(),
            name: "Ann".to_string(),
            phone_number: 5551234567,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["phoneNumber"], 5551234567i64);
        assert_eq!(json["name"], "Ann");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }
}
