use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::validation::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MilestoneRow {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: String,
    pub repo_link: Option<String>,
    pub tech_used: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMilestone {
    pub user_id: i32,
    #[validate(length(min = 1, max = 100, message = "Milestone name must be 1-100 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 500,
        message = "Milestone description must be 1-500 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,
    #[validate(url(message = "Repository link must be a URL"))]
    #[validate(length(max = 300, message = "Repository link must not exceed 300 characters"))]
    pub repo_link: Option<String>,
    #[validate(length(max = 300, message = "Tech used must not exceed 300 characters"))]
    pub tech_used: Option<String>,
}
