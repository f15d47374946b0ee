//! Access tokens for the hosted video service.
//!
//! Tokens are HS256-signed JWTs using the service's grant format: the API key
//! is the issuer, the account SID the subject, and a `grants` object carries
//! the participant identity and an optional room restriction.

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::VideoConfig;

/// Content type the video service expects in the JWT header.
pub const GRANT_CONTENT_TYPE: &str = "twilio-fpa;v=1";

/// Longest identity the video service accepts.
pub const MAX_IDENTITY_LEN: usize = 128;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Identity must be 1-128 characters")]
    InvalidIdentity,

    #[error("Failed to sign access token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoGrant {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub room: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grants {
    pub identity: String,
    pub video: VideoGrant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub jti: String,
    pub iss: String,
    pub sub: String,
    pub nbf: i64,
    pub exp: i64,
    pub grants: Grants,
}

#[derive(Clone)]
pub struct VideoTokenIssuer {
    account_sid: String,
    api_key: String,
    api_secret: String,
    ttl_secs: i64,
}

impl VideoTokenIssuer {
    pub fn new(config: &VideoConfig) -> Self {
        Self {
            account_sid: config.account_sid.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            ttl_secs: config.token_ttl_secs,
        }
    }

    /// Mints a token letting `identity` join video rooms, or only `room` when given.
    pub fn issue(&self, identity: &str, room: Option<&str>) -> Result<String, TokenError> {
        let length = identity.chars().count();
        if length == 0 || length > MAX_IDENTITY_LEN {
            return Err(TokenError::InvalidIdentity);
        }

        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            jti: format!("{}-{}", self.api_key, now),
            iss: self.api_key.clone(),
            sub: self.account_sid.clone(),
            nbf: now,
            exp: now + self.ttl_secs,
            grants: Grants {
                identity: identity.to_string(),
                video: VideoGrant {
                    room: room.map(str::to_string),
                },
            },
        };

        let mut header = Header::new(Algorithm::HS256);
        header.cty = Some(GRANT_CONTENT_TYPE.to_string());

        Ok(encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.api_secret.as_bytes()),
        )?)
    }
}

/// A throwaway identity for visitors that did not pick one.
pub fn guest_identity() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("guest-{}", &id[..8])
}
