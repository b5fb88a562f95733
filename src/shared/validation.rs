//! Field validation for inbound request bodies.

use crate::shared::error::SharedError;

/// Smallest accepted phone number (ten digits, no leading zero)
pub const MIN_PHONE_NUMBER: i64 = 1_000_000_000;

/// Largest accepted phone number
pub const MAX_PHONE_NUMBER: i64 = 9_999_999_999;

/// Minimum password length in characters
pub const MIN_PASSWORD_LEN: usize = 8;

/// Longest display name the accounts table accepts
pub const MAX_NAME_LEN: usize = 100;

/// Types that can check their own fields after deserialization
pub trait Validate {
    fn validate(&self) -> Result<(), SharedError>;
}

pub fn phone_number(field: &str, value: i64) -> Result<(), SharedError> {
    if (MIN_PHONE_NUMBER..=MAX_PHONE_NUMBER).contains(&value) {
        Ok(())
    } else {
        Err(SharedError::validation(field, "must be a 10 digit number"))
    }
}

pub fn non_empty(field: &str, value: &str) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        Err(SharedError::validation(field, "must not be empty"))
    } else {
        Ok(())
    }
}

pub fn password(field: &str, value: &str) -> Result<(), SharedError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            field,
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

pub fn name(field: &str, value: &str) -> Result<(), SharedError> {
    non_empty(field, value)?;
    if value.chars().count() > MAX_NAME_LEN {
        return Err(SharedError::validation(
            field,
            format!("must be at most {} characters", MAX_NAME_LEN),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_range() {
        assert!(phone_number("phoneNumber", 5551234567).is_ok());
        assert!(phone_number("phoneNumber", MIN_PHONE_NUMBER).is_ok());
        assert!(phone_number("phoneNumber", MAX_PHONE_NUMBER).is_ok());
        assert!(phone_number("phoneNumber", 999_999_999).is_err());
        assert!(phone_number("phoneNumber", 10_000_000_000).is_err());
        assert!(phone_number("phoneNumber", -5551234567).is_err());
    }

    #[test]
    fn test_non_empty_rejects_whitespace() {
        assert!(non_empty("content", "hi").is_ok());
        assert!(non_empty("content", "").is_err());
        assert!(non_empty("content", "   ").is_err());
    }

    #[test]
    fn test_password_length_counts_chars() {
        assert!(password("password", "longenough1").is_ok());
        assert!(password("password", "short").is_err());
        // Eight multi-byte characters are enough
        assert!(password("password", "éééééééé").is_ok());
    }

    #[test]
    fn test_name_bounds() {
        assert!(name("name", "Ann").is_ok());
        assert!(name("name", "").is_err());
        assert!(name("name", &"a".repeat(MAX_NAME_LEN + 1)).is_err());
    }
}
