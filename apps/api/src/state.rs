use sqlx::PgPool;

use crate::config::Config;
use crate::video::token::VideoTokenIssuer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Signs access tokens for the hosted video rooms used in negotiation practice.
    pub video_tokens: VideoTokenIssuer,
}
