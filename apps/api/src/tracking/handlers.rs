use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::application::{
    ApplicationDetailRow, ApplicationRow, CityRow, CreateApplication,
};
use crate::models::milestone::{CreateMilestone, MilestoneRow};
use crate::models::offer::{CreateOffer, OfferDecision, OfferRow};
use crate::state::AppState;
use crate::tracking::queries;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationIdQuery {
    pub application_id: i32,
}

/// POST /api/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateApplication>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    req.validate()?;
    let application = queries::insert_application(&state.db, &req).await?;
    info!(
        "User {} applied to role {} (application {})",
        application.user_id, application.role_id, application.id
    );
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/applications?user_id=<id>
pub async fn handle_list_applications(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<Vec<ApplicationDetailRow>>, AppError> {
    Ok(Json(
        queries::applications_for_user(&state.db, params.user_id).await?,
    ))
}

/// GET /api/cities
pub async fn handle_list_cities(
    State(state): State<AppState>,
) -> Result<Json<Vec<CityRow>>, AppError> {
    Ok(Json(queries::list_cities(&state.db).await?))
}

/// POST /api/offers
pub async fn handle_create_offer(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateOffer>,
) -> Result<(StatusCode, Json<OfferRow>), AppError> {
    req.validate()?;
    let offer = queries::insert_offer(&state.db, &req).await?;
    info!(
        "Recorded offer {} for application {}",
        offer.id, offer.application_id
    );
    Ok((StatusCode::CREATED, Json(offer)))
}

/// GET /api/offers?application_id=<id>
pub async fn handle_list_offers(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ApplicationIdQuery>,
) -> Result<Json<Vec<OfferRow>>, AppError> {
    Ok(Json(
        queries::offers_for_application(&state.db, params.application_id).await?,
    ))
}

/// PATCH /api/offers/:id
pub async fn handle_decide_offer(
    State(state): State<AppState>,
    AppPath(offer_id): AppPath<i32>,
    AppJson(req): AppJson<OfferDecision>,
) -> Result<Json<OfferRow>, AppError> {
    let offer = queries::decide_offer(&state.db, offer_id, req.accepted_offer)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Offer {offer_id} not found")))?;
    info!("Offer {offer_id} accepted={}", req.accepted_offer);
    Ok(Json(offer))
}

/// POST /api/milestones
pub async fn handle_create_milestone(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateMilestone>,
) -> Result<(StatusCode, Json<MilestoneRow>), AppError> {
    req.validate()?;
    let milestone = queries::insert_milestone(&state.db, &req).await?;
    info!("User {} logged milestone {}", milestone.user_id, milestone.id);
    Ok((StatusCode::CREATED, Json(milestone)))
}

/// GET /api/milestones?user_id=<id>
pub async fn handle_list_milestones(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<Vec<MilestoneRow>>, AppError> {
    Ok(Json(
        queries::milestones_for_user(&state.db, params.user_id).await?,
    ))
}
