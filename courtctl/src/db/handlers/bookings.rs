//! Database repository for bookings and their equipment line-items.
//!
//! The conflict lookup and the insert here are building blocks for the
//! orchestrator in [`crate::booking`], which runs them on one SERIALIZABLE
//! transaction. Used on their own they give no atomicity guarantee.

use crate::api::models::bookings::BookingStatus;
use crate::db::errors::Result;
use crate::db::models::bookings::{BookingCreateDBRequest, BookingDBResponse, BookingEquipmentLineDBResponse};
use crate::types::{BookingId, CourtId, UserId};
use chrono::NaiveDate;
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct Bookings<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Bookings<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// First CONFIRMED booking for the court/date whose half-open window
    /// overlaps `[start_time, end_time)`, if any.
    ///
    /// Overlap test: `existing.start < requested.end AND
    /// requested.start < existing.end`. Adjacent windows (one ends exactly
    /// where the other starts) do not overlap.
    #[instrument(skip(self), err)]
    pub async fn find_conflict(
        &mut self,
        court_id: CourtId,
        date: NaiveDate,
        start_time: i32,
        end_time: i32,
    ) -> Result<Option<BookingDBResponse>> {
        let conflict = sqlx::query_as::<_, BookingDBResponse>(
            r#"
            SELECT id, user_id, court_id, coach_id, date, start_time, end_time,
                   status, total_price, created_at
            FROM bookings
            WHERE court_id = $1
              AND date = $2
              AND status = $3
              AND start_time < $5
              AND end_time > $4
            LIMIT 1
            "#,
        )
        .bind(court_id)
        .bind(date)
        .bind(BookingStatus::Confirmed)
        .bind(start_time)
        .bind(end_time)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(conflict)
    }

    /// Insert the booking row and all of its equipment lines.
    ///
    /// Runs on whatever connection this repository wraps; the caller owns
    /// the transaction boundary.
    #[instrument(skip(self, request), fields(court_id = %request.court_id, lines = request.equipment.len()), err)]
    pub async fn create(&mut self, request: &BookingCreateDBRequest) -> Result<BookingDBResponse> {
        let booking = sqlx::query_as::<_, BookingDBResponse>(
            r#"
            INSERT INTO bookings (id, user_id, court_id, coach_id, date, start_time, end_time, status, total_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, court_id, coach_id, date, start_time, end_time,
                      status, total_price, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(request.court_id)
        .bind(request.coach_id)
        .bind(request.date)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(BookingStatus::Confirmed)
        .bind(request.total_price)
        .fetch_one(&mut *self.db)
        .await?;

        for line in &request.equipment {
            sqlx::query(
                r#"
                INSERT INTO booking_equipment (id, booking_id, equipment_id, quantity)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(booking.id)
            .bind(line.equipment_id)
            .bind(line.quantity)
            .execute(&mut *self.db)
            .await?;
        }

        Ok(booking)
    }

    /// Equipment lines for a set of bookings, joined with the equipment
    /// rows so responses can carry names and hourly prices.
    #[instrument(skip(self, booking_ids), fields(count = booking_ids.len()), err)]
    pub async fn equipment_lines(&mut self, booking_ids: &[BookingId]) -> Result<Vec<BookingEquipmentLineDBResponse>> {
        if booking_ids.is_empty() {
            return Ok(Vec::new());
        }

        let lines = sqlx::query_as::<_, BookingEquipmentLineDBResponse>(
            r#"
            SELECT be.booking_id, be.equipment_id, e.name AS equipment_name,
                   be.quantity, e.price_per_hour
            FROM booking_equipment AS be
            INNER JOIN equipment AS e ON e.id = be.equipment_id
            WHERE be.booking_id = ANY($1)
            ORDER BY e.name ASC
            "#,
        )
        .bind(booking_ids)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(lines)
    }

    /// A user's booking history, newest first.
    #[instrument(skip(self), err)]
    pub async fn list_by_user(&mut self, user_id: UserId) -> Result<Vec<BookingDBResponse>> {
        let bookings = sqlx::query_as::<_, BookingDBResponse>(
            r#"
            SELECT id, user_id, court_id, coach_id, date, start_time, end_time,
                   status, total_price, created_at
            FROM bookings
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(bookings)
    }

    /// Every booking in the system, newest first (privileged view).
    #[instrument(skip(self), err)]
    pub async fn list_all(&mut self) -> Result<Vec<BookingDBResponse>> {
        let bookings = sqlx::query_as::<_, BookingDBResponse>(
            r#"
            SELECT id, user_id, court_id, coach_id, date, start_time, end_time,
                   status, total_price, created_at
            FROM bookings
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(bookings)
    }
}
