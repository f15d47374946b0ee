use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OfferRow {
    pub id: i32,
    pub application_id: i32,
    pub base_salary: i32,
    pub has_health_benefits: Option<bool>,
    pub has_pto: Option<bool>,
    pub has_retirement: Option<bool>,
    pub covers_relocation: Option<bool>,
    pub accepted_offer: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOffer {
    pub application_id: i32,
    #[validate(range(min = 0, message = "Base salary cannot be negative"))]
    pub base_salary: i32,
    pub has_health_benefits: Option<bool>,
    pub has_pto: Option<bool>,
    pub has_retirement: Option<bool>,
    pub covers_relocation: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OfferDecision {
    pub accepted_offer: bool,
}
