use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::validation::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub username: String,
    /// Argon2id PHC string. Never sent to clients.
    #[serde(skip_serializing, default)]
    pub hash: String,
    pub current_salary: Option<i32>,
    pub active_role: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(max = 100, message = "First name must not exceed 100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 100, message = "Last name must not exceed 100 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 200, message = "Email must not exceed 200 characters"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub username: String,
    #[validate(length(
        min = 8,
        max = 64,
        message = "Password must be between 8 and 64 characters"
    ))]
    pub password: String,
    #[validate(range(min = 0, message = "Salary cannot be negative"))]
    pub current_salary: Option<i32>,
}

/// Partial update of a user's profile. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserPatch {
    #[validate(length(max = 100, message = "First name must not exceed 100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 100, message = "Last name must not exceed 100 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 200, message = "Email must not exceed 200 characters"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub active_role: Option<i32>,
    #[validate(range(min = 0, message = "Salary cannot be negative"))]
    pub current_salary: Option<i32>,
}

/// Reads an id sent as a number or as the string value of a `<select>`.
/// An empty string means the selector was left untouched.
fn optional_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = Option<i32>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer id, a numeric string, an empty string, or null")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i32::try_from(value)
                .map(Some)
                .map_err(|_| E::custom(format!("id out of range: {value}")))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i32::try_from(value)
                .map(Some)
                .map_err(|_| E::custom(format!("id out of range: {value}")))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let value = value.trim();
            if value.is_empty() {
                return Ok(None);
            }
            value
                .parse::<i32>()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid id: '{value}'")))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(IdVisitor)
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

impl UserPatch {
    /// Trims text fields and drops blank ones, so an empty input never
    /// overwrites what is stored.
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        UserPatch {
            first_name: keep(self.first_name),
            last_name: keep(self.last_name),
            email: keep(self.email),
            active_role: self.active_role,
            current_salary: self.current_salary,
        }
    }
}
