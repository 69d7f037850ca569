//! Bearer token issuing and validation.
//!
//! Tokens are JWTs signed with HS256 using the configured `secret_key`.
//! The claims carry the user id and email; the role is NOT trusted from
//! the token — the extractor re-reads the user row on every request.

use crate::config::Config;
use crate::db::models::users::UserDBResponse;
use crate::errors::{Error, Result};
use crate::types::UserId;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: UserId,
    pub email: String,
    /// Expiry, seconds since the epoch
    pub exp: i64,
    /// Issued at, seconds since the epoch
    pub iat: i64,
}

/// Issue a bearer token for a user.
pub fn issue_token(user: &UserDBResponse, config: &Config) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        iat: now.timestamp(),
        exp: (now + chrono::Duration::hours(config.token_ttl_hours as i64)).timestamp(),
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(config.secret_key.as_bytes()))
        .map_err(|e| Error::Other(anyhow::anyhow!("sign token: {e}")))
}

/// Validate a bearer token and return its claims.
///
/// Expiry is checked by the JWT library; any signature or shape problem
/// is reported as an authentication failure, not an internal error.
pub fn decode_token(token: &str, config: &Config) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| Error::Unauthenticated {
        message: Some("Invalid or expired token".to_string()),
    })
}
