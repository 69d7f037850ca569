//! HTTP handlers for bookings.
//!
//! Creation delegates to the orchestrator in [`crate::booking`]; the list
//! endpoints are simple projections that resolve courts, coaches and
//! equipment lines for display.

use crate::{
    AppState,
    api::models::bookings::{BookingCreate, BookingEquipmentResponse, BookingOutcomeResponse, BookingResponse},
    api::models::coaches::CoachResponse,
    api::models::courts::CourtResponse,
    api::models::users::CurrentUser,
    auth::permissions,
    booking,
    db::{
        errors::DbError,
        handlers::{Bookings, Coaches, Courts},
        models::bookings::BookingDBResponse,
    },
    errors::Result,
    types::{Operation, Resource},
};
use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::PgConnection;
use std::collections::HashMap;

/// Create a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    summary = "Create a booking",
    description = "Atomically reserve a court, optional equipment and an optional coach for a time slot. \
                   All availability checks and the insert run in one transaction; on any failure nothing is persisted.",
    request_body = BookingCreate,
    responses(
        (status = 201, description = "Booking confirmed", body = BookingOutcomeResponse),
        (status = 400, description = "Malformed window or quantities"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Court, equipment or coach not found"),
        (status = 409, description = "Court conflict, equipment shortage or coach unavailable"),
        (status = 503, description = "Concurrent booking raced this one; safe to retry"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_booking(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(data): Json<BookingCreate>,
) -> Result<(StatusCode, Json<BookingOutcomeResponse>)> {
    permissions::require(&current_user, Resource::Bookings, Operation::CreateOwn)?;

    let outcome = booking::create_booking(&state.db, &state.config.facility, current_user.id, data).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingOutcomeResponse {
            booking: outcome.booking,
            pricing: outcome.pricing.into(),
        }),
    ))
}

/// The current user's booking history
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    summary = "List own bookings",
    responses(
        (status = 200, description = "Own bookings, newest first", body = [BookingResponse]),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_own_bookings(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<BookingResponse>>> {
    permissions::require(&current_user, Resource::Bookings, Operation::ReadOwn)?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let bookings = Bookings::new(&mut conn).list_by_user(current_user.id).await?;
    let responses = resolve_relations(&mut conn, bookings).await?;

    Ok(Json(responses))
}

/// Every booking in the system (admin)
#[utoipa::path(
    get,
    path = "/bookings/all",
    tag = "bookings",
    summary = "List all bookings",
    responses(
        (status = 200, description = "All bookings, newest first", body = [BookingResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_all_bookings(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<BookingResponse>>> {
    permissions::require(&current_user, Resource::Bookings, Operation::ReadAll)?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let bookings = Bookings::new(&mut conn).list_all().await?;
    let responses = resolve_relations(&mut conn, bookings).await?;

    Ok(Json(responses))
}

/// Attach courts, coaches and equipment lines to raw booking rows.
async fn resolve_relations(conn: &mut PgConnection, bookings: Vec<BookingDBResponse>) -> Result<Vec<BookingResponse>> {
    let booking_ids: Vec<_> = bookings.iter().map(|b| b.id).collect();

    let mut court_ids: Vec<_> = bookings.iter().map(|b| b.court_id).collect();
    court_ids.sort_unstable();
    court_ids.dedup();

    let mut coach_ids: Vec<_> = bookings.iter().filter_map(|b| b.coach_id).collect();
    coach_ids.sort_unstable();
    coach_ids.dedup();

    let courts: HashMap<_, _> = Courts::new(&mut *conn)
        .get_bulk(&court_ids)
        .await?
        .into_iter()
        .map(|court| (court.id, CourtResponse::from(court)))
        .collect();

    let coaches: HashMap<_, _> = Coaches::new(&mut *conn)
        .get_bulk(&coach_ids)
        .await?
        .into_iter()
        .map(|coach| (coach.id, CoachResponse::from(coach)))
        .collect();

    let mut equipment_by_booking: HashMap<_, Vec<BookingEquipmentResponse>> = HashMap::new();
    for line in Bookings::new(&mut *conn).equipment_lines(&booking_ids).await? {
        equipment_by_booking
            .entry(line.booking_id)
            .or_default()
            .push(BookingEquipmentResponse {
                equipment_id: line.equipment_id,
                name: line.equipment_name,
                quantity: line.quantity,
                price_per_hour: line.price_per_hour,
            });
    }

    let responses = bookings
        .into_iter()
        .filter_map(|booking| {
            // Bookings hold FK references, so the court is always present;
            // skip rather than fail if a row disappears mid-read.
            let court = courts.get(&booking.court_id)?.clone();
            let coach = booking.coach_id.and_then(|id| coaches.get(&id).cloned());
            let equipment = equipment_by_booking.remove(&booking.id).unwrap_or_default();

            Some(BookingResponse {
                id: booking.id,
                user_id: booking.user_id,
                court_id: booking.court_id,
                coach_id: booking.coach_id,
                date: booking.date,
                start_time: booking.start_time,
                end_time: booking.end_time,
                status: booking.status,
                total_price: booking.total_price,
                created_at: booking.created_at,
                court,
                coach,
                equipment,
            })
        })
        .collect();

    Ok(responses)
}
