//! Extractor for the authenticated user.
//!
//! Reads the `Authorization: Bearer <token>` header, validates the token,
//! and re-reads the user row so role changes and deletions take effect on
//! the next request rather than at token expiry.

use crate::{
    AppState,
    api::models::users::CurrentUser,
    auth::token,
    db::{errors::DbError, handlers::Users},
    errors::{Error, Result},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::instrument;

/// Pull the bearer token out of the Authorization header, if present.
fn bearer_token(parts: &Parts) -> Result<&str> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(Error::Unauthenticated { message: None })?;

    let value = header.to_str().map_err(|_| Error::Unauthenticated {
        message: Some("Invalid authorization header".to_string()),
    })?;

    value.strip_prefix("Bearer ").ok_or(Error::Unauthenticated {
        message: Some("Authorization header must use the Bearer scheme".to_string()),
    })
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = bearer_token(parts)?;
        let claims = token::decode_token(token, &state.config)?;

        let mut conn = state.db.acquire().await.map_err(DbError::from)?;
        let user = Users::new(&mut conn)
            .get_by_id(claims.sub)
            .await?
            .ok_or(Error::Unauthenticated {
                message: Some("Unknown user".to_string()),
            })?;

        Ok(CurrentUser::from(user))
    }
}
