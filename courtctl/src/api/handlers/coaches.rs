//! HTTP handlers for coaches and their availability windows.

use crate::{
    AppState,
    api::models::coaches::{
        AvailabilityQuery, CoachAvailabilityCreate, CoachAvailabilityResponse, CoachCreate, CoachResponse, CoachUpdate,
    },
    api::models::users::CurrentUser,
    auth::permissions,
    db::{
        errors::DbError,
        handlers::Coaches,
        models::coaches::{CoachAvailabilityCreateDBRequest, CoachCreateDBRequest, CoachUpdateDBRequest},
    },
    errors::{Error, Result},
    types::{CoachId, Operation, Resource},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

/// List active coaches (public)
#[utoipa::path(
    get,
    path = "/coaches",
    tag = "coaches",
    summary = "List active coaches",
    responses(
        (status = 200, description = "Active coaches, ordered by name", body = [CoachResponse]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_coaches(State(state): State<AppState>) -> Result<Json<Vec<CoachResponse>>> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let coaches = Coaches::new(&mut conn).list(true).await?;

    Ok(Json(coaches.into_iter().map(CoachResponse::from).collect()))
}

/// List every coach including disabled ones (admin)
#[utoipa::path(
    get,
    path = "/coaches/all",
    tag = "coaches",
    summary = "List all coaches",
    responses(
        (status = 200, description = "All coaches, ordered by name", body = [CoachResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_all_coaches(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<CoachResponse>>> {
    permissions::require(&current_user, Resource::Coaches, Operation::SystemAccess)?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let coaches = Coaches::new(&mut conn).list(false).await?;

    Ok(Json(coaches.into_iter().map(CoachResponse::from).collect()))
}

/// Add a coach (admin)
#[utoipa::path(
    post,
    path = "/coaches",
    tag = "coaches",
    summary = "Create a coach",
    request_body = CoachCreate,
    responses(
        (status = 201, description = "Coach created", body = CoachResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_coach(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(data): Json<CoachCreate>,
) -> Result<(StatusCode, Json<CoachResponse>)> {
    permissions::require(&current_user, Resource::Coaches, Operation::CreateAll)?;

    if data.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Coach name is required".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let coach = Coaches::new(&mut conn).create(&CoachCreateDBRequest::from(data)).await?;

    Ok((StatusCode::CREATED, Json(CoachResponse::from(coach))))
}

/// Update a coach's hourly price or active flag (admin)
#[utoipa::path(
    patch,
    path = "/coaches/{id}",
    tag = "coaches",
    summary = "Update a coach",
    params(("id" = String, Path, description = "Coach ID")),
    request_body = CoachUpdate,
    responses(
        (status = 200, description = "Updated coach", body = CoachResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Coach not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_coach(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<CoachId>,
    Json(data): Json<CoachUpdate>,
) -> Result<Json<CoachResponse>> {
    permissions::require(&current_user, Resource::Coaches, Operation::UpdateAll)?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let coach = Coaches::new(&mut conn)
        .update(id, &CoachUpdateDBRequest::from(data))
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Coach".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(CoachResponse::from(coach)))
}

/// Enable or disable a coach (admin)
#[utoipa::path(
    patch,
    path = "/coaches/{id}/toggle",
    tag = "coaches",
    summary = "Toggle a coach's active flag",
    params(("id" = String, Path, description = "Coach ID")),
    responses(
        (status = 200, description = "Updated coach", body = CoachResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Coach not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn toggle_coach(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<CoachId>,
) -> Result<Json<CoachResponse>> {
    permissions::require(&current_user, Resource::Coaches, Operation::UpdateAll)?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let coach = Coaches::new(&mut conn).toggle_active(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Coach".to_string(),
        id: id.to_string(),
    })?;

    Ok(Json(CoachResponse::from(coach)))
}

/// Add an availability window for a coach (admin)
#[utoipa::path(
    post,
    path = "/coaches/{id}/availability",
    tag = "coaches",
    summary = "Add a coach availability window",
    params(("id" = String, Path, description = "Coach ID")),
    request_body = CoachAvailabilityCreate,
    responses(
        (status = 201, description = "Availability window created", body = CoachAvailabilityResponse),
        (status = 400, description = "Malformed window"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Coach not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn add_availability(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<CoachId>,
    Json(data): Json<CoachAvailabilityCreate>,
) -> Result<(StatusCode, Json<CoachAvailabilityResponse>)> {
    permissions::require(&current_user, Resource::Coaches, Operation::UpdateAll)?;

    if data.start_time >= data.end_time || data.start_time < 0 || data.end_time > 24 {
        return Err(Error::Validation {
            message: "Availability window must satisfy 0 <= startTime < endTime <= 24".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let mut repo = Coaches::new(&mut conn);

    if repo.get_by_id(id).await?.is_none() {
        return Err(Error::NotFound {
            resource: "Coach".to_string(),
            id: id.to_string(),
        });
    }

    let availability = repo
        .add_availability(&CoachAvailabilityCreateDBRequest::new(id, data))
        .await?;

    Ok((StatusCode::CREATED, Json(CoachAvailabilityResponse::from(availability))))
}

/// A coach's availability windows on one date (public)
#[utoipa::path(
    get,
    path = "/coaches/{id}/availability",
    tag = "coaches",
    summary = "List a coach's availability for a date",
    params(
        ("id" = String, Path, description = "Coach ID"),
        AvailabilityQuery,
    ),
    responses(
        (status = 200, description = "Availability windows, earliest first", body = [CoachAvailabilityResponse]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_availability(
    State(state): State<AppState>,
    Path(id): Path<CoachId>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<CoachAvailabilityResponse>>> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let windows = Coaches::new(&mut conn).availability_for_date(id, query.date).await?;

    Ok(Json(windows.into_iter().map(CoachAvailabilityResponse::from).collect()))
}

/// Every availability window for a coach (admin)
#[utoipa::path(
    get,
    path = "/coaches/{id}/availability/all",
    tag = "coaches",
    summary = "List all availability windows for a coach",
    params(("id" = String, Path, description = "Coach ID")),
    responses(
        (status = 200, description = "Availability windows, by date then start", body = [CoachAvailabilityResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_all_availability(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<CoachId>,
) -> Result<Json<Vec<CoachAvailabilityResponse>>> {
    permissions::require(&current_user, Resource::Coaches, Operation::SystemAccess)?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let windows = Coaches::new(&mut conn).availability_all(id).await?;

    Ok(Json(windows.into_iter().map(CoachAvailabilityResponse::from).collect()))
}
