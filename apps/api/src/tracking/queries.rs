use sqlx::PgPool;

use crate::models::application::{ApplicationDetailRow, ApplicationRow, CityRow, CreateApplication};
use crate::models::milestone::{CreateMilestone, MilestoneRow};
use crate::models::offer::{CreateOffer, OfferRow};

pub async fn insert_application(
    pool: &PgPool,
    application: &CreateApplication,
) -> Result<ApplicationRow, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        "INSERT INTO applications (user_id, role_id, location) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(application.user_id)
    .bind(application.role_id)
    .bind(application.location.as_deref().map(str::trim))
    .fetch_one(pool)
    .await
}

pub async fn applications_for_user(
    pool: &PgPool,
    user_id: i32,
) -> Result<Vec<ApplicationDetailRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationDetailRow>(
        r#"
        SELECT a.id, a.user_id, a.role_id, a.location, a.created_at,
               r.name AS role_name, c.name AS company_name
        FROM applications a
        JOIN roles r ON r.id = a.role_id
        JOIN companies c ON c.id = r.company_id
        WHERE a.user_id = $1
        ORDER BY a.created_at DESC, a.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Distinct, non-blank application locations in alphabetical order.
pub async fn list_cities(pool: &PgPool) -> Result<Vec<CityRow>, sqlx::Error> {
    sqlx::query_as::<_, CityRow>(
        r#"
        SELECT DISTINCT btrim(location) AS city
        FROM applications
        WHERE location IS NOT NULL AND btrim(location) <> ''
        ORDER BY city
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn insert_offer(pool: &PgPool, offer: &CreateOffer) -> Result<OfferRow, sqlx::Error> {
    sqlx::query_as::<_, OfferRow>(
        r#"
        INSERT INTO offers
            (application_id, base_salary, has_health_benefits, has_pto,
             has_retirement, covers_relocation)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(offer.application_id)
    .bind(offer.base_salary)
    .bind(offer.has_health_benefits)
    .bind(offer.has_pto)
    .bind(offer.has_retirement)
    .bind(offer.covers_relocation)
    .fetch_one(pool)
    .await
}

pub async fn offers_for_application(
    pool: &PgPool,
    application_id: i32,
) -> Result<Vec<OfferRow>, sqlx::Error> {
    sqlx::query_as::<_, OfferRow>("SELECT * FROM offers WHERE application_id = $1 ORDER BY id")
        .bind(application_id)
        .fetch_all(pool)
        .await
}

/// Records whether an offer was accepted. Returns `None` for an unknown offer.
pub async fn decide_offer(
    pool: &PgPool,
    offer_id: i32,
    accepted: bool,
) -> Result<Option<OfferRow>, sqlx::Error> {
    sqlx::query_as::<_, OfferRow>(
        "UPDATE offers SET accepted_offer = $2 WHERE id = $1 RETURNING *",
    )
    .bind(offer_id)
    .bind(accepted)
    .fetch_optional(pool)
    .await
}

pub async fn insert_milestone(
    pool: &PgPool,
    milestone: &CreateMilestone,
) -> Result<MilestoneRow, sqlx::Error> {
    sqlx::query_as::<_, MilestoneRow>(
        r#"
        INSERT INTO milestones (user_id, name, description, repo_link, tech_used)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(milestone.user_id)
    .bind(milestone.name.trim())
    .bind(milestone.description.trim())
    .bind(&milestone.repo_link)
    .bind(&milestone.tech_used)
    .fetch_one(pool)
    .await
}

pub async fn milestones_for_user(
    pool: &PgPool,
    user_id: i32,
) -> Result<Vec<MilestoneRow>, sqlx::Error> {
    sqlx::query_as::<_, MilestoneRow>(
        "SELECT * FROM milestones WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
