use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: i32,
    pub user_id: i32,
    pub role_id: i32,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An application joined with the role and company it targets.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationDetailRow {
    pub id: i32,
    pub user_id: i32,
    pub role_id: i32,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub role_name: String,
    pub company_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateApplication {
    pub user_id: i32,
    pub role_id: i32,
    #[validate(length(max = 100, message = "Location must not exceed 100 characters"))]
    pub location: Option<String>,
}

/// One entry of the city dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CityRow {
    pub city: String,
}
