use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::errors::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::models::user::{CreateUser, UserPatch, UserRow};
use crate::profile::password::hash_password;
use crate::profile::queries;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub id: i32,
}

/// POST /api/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateUser>,
) -> Result<(StatusCode, Json<UserRow>), AppError> {
    req.validate()?;

    // Argon2 is CPU-bound; keep it off the async workers.
    let password = req.password.clone();
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Hashing task failed: {e}")))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))?;

    let user = queries::insert_user(&state.db, &req, &hash).await?;
    info!("Registered user {} ({})", user.id, user.username);
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/user?id=<id>
pub async fn handle_get_user(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<UserRow>, AppError> {
    let user = queries::get_user(&state.db, params.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", params.id)))?;
    Ok(Json(user))
}

/// PATCH /api/user?id=<id>
///
/// Blank text fields are dropped before validation, so they never overwrite
/// stored values.
pub async fn handle_patch_user(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
    AppJson(patch): AppJson<UserPatch>,
) -> Result<Json<UserRow>, AppError> {
    let patch = patch.normalized();
    patch.validate()?;
    let user = queries::update_profile(&state.db, params.id, &patch).await?;
    Ok(Json(user))
}
