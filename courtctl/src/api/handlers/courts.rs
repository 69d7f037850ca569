//! HTTP handlers for the court catalog.

use crate::{
    AppState,
    api::models::courts::{CourtCreate, CourtResponse},
    api::models::users::CurrentUser,
    auth::permissions,
    db::{errors::DbError, handlers::Courts, models::courts::CourtCreateDBRequest},
    errors::{Error, Result},
    types::{CourtId, Operation, Resource},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

/// List active courts (public)
#[utoipa::path(
    get,
    path = "/courts",
    tag = "courts",
    summary = "List active courts",
    responses(
        (status = 200, description = "Active courts, ordered by name", body = [CourtResponse]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_courts(State(state): State<AppState>) -> Result<Json<Vec<CourtResponse>>> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let courts = Courts::new(&mut conn).list(true).await?;

    Ok(Json(courts.into_iter().map(CourtResponse::from).collect()))
}

/// List every court including disabled ones (admin)
#[utoipa::path(
    get,
    path = "/courts/all",
    tag = "courts",
    summary = "List all courts",
    responses(
        (status = 200, description = "All courts, ordered by name", body = [CourtResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_all_courts(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<CourtResponse>>> {
    permissions::require(&current_user, Resource::Courts, Operation::SystemAccess)?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let courts = Courts::new(&mut conn).list(false).await?;

    Ok(Json(courts.into_iter().map(CourtResponse::from).collect()))
}

/// Add a court to the catalog (admin)
#[utoipa::path(
    post,
    path = "/courts",
    tag = "courts",
    summary = "Create a court",
    request_body = CourtCreate,
    responses(
        (status = 201, description = "Court created", body = CourtResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_court(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(data): Json<CourtCreate>,
) -> Result<(StatusCode, Json<CourtResponse>)> {
    permissions::require(&current_user, Resource::Courts, Operation::CreateAll)?;

    if data.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Court name is required".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let court = Courts::new(&mut conn).create(&CourtCreateDBRequest::from(data)).await?;

    Ok((StatusCode::CREATED, Json(CourtResponse::from(court))))
}

/// Enable or disable a court (admin)
#[utoipa::path(
    patch,
    path = "/courts/{id}/toggle",
    tag = "courts",
    summary = "Toggle a court's active flag",
    params(("id" = String, Path, description = "Court ID")),
    responses(
        (status = 200, description = "Updated court", body = CourtResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Court not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn toggle_court(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<CourtId>,
) -> Result<Json<CourtResponse>> {
    permissions::require(&current_user, Resource::Courts, Operation::UpdateAll)?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let court = Courts::new(&mut conn).toggle_active(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Court".to_string(),
        id: id.to_string(),
    })?;

    Ok(Json(CourtResponse::from(court)))
}
