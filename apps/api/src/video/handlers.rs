use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extract::AppQuery;
use crate::state::AppState;
use crate::video::token::{guest_identity, TokenError};

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub identity: Option<String>,
    pub room: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub identity: String,
    pub token: String,
}

/// GET /token
///
/// Issues a video access token. Without `?identity=` a guest identity is generated.
pub async fn handle_token(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TokenQuery>,
) -> Result<Json<TokenResponse>, AppError> {
    let identity = params
        .identity
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .unwrap_or_else(guest_identity);
    let room = params
        .room
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());

    let token = state
        .video_tokens
        .issue(&identity, room)
        .map_err(|e| match e {
            TokenError::InvalidIdentity => AppError::Validation(e.to_string()),
            TokenError::Signing(_) => AppError::Video(e.to_string()),
        })?;

    info!("Issued video token for '{identity}'");
    Ok(Json(TokenResponse { identity, token }))
}
