//! HTTP handlers for registration and login.

use crate::{
    AppState,
    api::models::auth::{AuthResponse, LoginRequest, RegisterRequest},
    api::models::users::{Role, UserResponse},
    auth::{password, token},
    db::{errors::DbError, handlers::Users, models::users::UserCreateDBRequest},
    errors::{Error, Result},
};
use axum::{extract::State, http::StatusCode, response::Json};

const MIN_PASSWORD_LENGTH: usize = 8;

/// Register a new account
#[utoipa::path(
    post,
    path = "/authentication/register",
    tag = "authentication",
    summary = "Register a new account",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid registration data"),
        (status = 409, description = "Email already registered"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(State(state): State<AppState>, Json(data): Json<RegisterRequest>) -> Result<(StatusCode, Json<AuthResponse>)> {
    if data.name.trim().is_empty() || data.email.trim().is_empty() {
        return Err(Error::Validation {
            message: "Name and email are required".to_string(),
        });
    }
    if data.password.len() < MIN_PASSWORD_LENGTH {
        return Err(Error::Validation {
            message: format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        });
    }

    let password_hash = password::hash_string(&data.password)?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let user = Users::new(&mut conn)
        .create(&UserCreateDBRequest {
            name: data.name,
            email: data.email,
            password_hash,
            role: Role::User,
        })
        .await?;

    let token = token::issue_token(&user, &state.config)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/authentication/login",
    tag = "authentication",
    summary = "Log in",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(data): Json<LoginRequest>) -> Result<Json<AuthResponse>> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let user = Users::new(&mut conn).get_by_email(&data.email).await?;

    // Verify against a found user; a miss falls through to the same error
    // so responses don't reveal which emails exist.
    let user = match user {
        Some(user) if password::verify_string(&data.password, &user.password_hash)? => user,
        _ => {
            return Err(Error::Unauthenticated {
                message: Some("Invalid email or password".to_string()),
            });
        }
    };

    let token = token::issue_token(&user, &state.config)?;

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}
