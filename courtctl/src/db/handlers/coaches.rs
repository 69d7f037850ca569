//! Database repository for coaches and their availability windows.

use crate::db::errors::Result;
use crate::db::models::coaches::{
    CoachAvailabilityCreateDBRequest, CoachAvailabilityDBResponse, CoachCreateDBRequest, CoachDBResponse, CoachUpdateDBRequest,
};
use crate::types::CoachId;
use chrono::NaiveDate;
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct Coaches<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Coaches<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    pub async fn create(&mut self, request: &CoachCreateDBRequest) -> Result<CoachDBResponse> {
        let coach = sqlx::query_as::<_, CoachDBResponse>(
            r#"
            INSERT INTO coaches (id, name, price_per_hour)
            VALUES ($1, $2, $3)
            RETURNING id, name, price_per_hour, is_active, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(request.price_per_hour)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(coach)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_id(&mut self, id: CoachId) -> Result<Option<CoachDBResponse>> {
        let coach = sqlx::query_as::<_, CoachDBResponse>(
            r#"
            SELECT id, name, price_per_hour, is_active, created_at
            FROM coaches
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(coach)
    }

    /// List coaches ordered by name; `active_only` restricts to bookable coaches.
    #[instrument(skip(self), err)]
    pub async fn list(&mut self, active_only: bool) -> Result<Vec<CoachDBResponse>> {
        let coaches = sqlx::query_as::<_, CoachDBResponse>(
            r#"
            SELECT id, name, price_per_hour, is_active, created_at
            FROM coaches
            WHERE is_active OR NOT $1
            ORDER BY name ASC
            "#,
        )
        .bind(active_only)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(coaches)
    }

    /// Fetch several coaches at once, for resolving booking relations.
    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    pub async fn get_bulk(&mut self, ids: &[CoachId]) -> Result<Vec<CoachDBResponse>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let coaches = sqlx::query_as::<_, CoachDBResponse>(
            r#"
            SELECT id, name, price_per_hour, is_active, created_at
            FROM coaches
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(coaches)
    }

    /// Partial update; `None` fields keep their current value. Returns
    /// `None` when the coach does not exist.
    #[instrument(skip(self, request), err)]
    pub async fn update(&mut self, id: CoachId, request: &CoachUpdateDBRequest) -> Result<Option<CoachDBResponse>> {
        let coach = sqlx::query_as::<_, CoachDBResponse>(
            r#"
            UPDATE coaches
            SET price_per_hour = COALESCE($2, price_per_hour),
                is_active = COALESCE($3, is_active)
            WHERE id = $1
            RETURNING id, name, price_per_hour, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(request.price_per_hour)
        .bind(request.is_active)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(coach)
    }

    /// Flip the active flag; returns `None` when the coach does not exist.
    #[instrument(skip(self), err)]
    pub async fn toggle_active(&mut self, id: CoachId) -> Result<Option<CoachDBResponse>> {
        let coach = sqlx::query_as::<_, CoachDBResponse>(
            r#"
            UPDATE coaches
            SET is_active = NOT is_active
            WHERE id = $1
            RETURNING id, name, price_per_hour, is_active, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(coach)
    }

    #[instrument(skip(self, request), fields(coach_id = %request.coach_id), err)]
    pub async fn add_availability(&mut self, request: &CoachAvailabilityCreateDBRequest) -> Result<CoachAvailabilityDBResponse> {
        let availability = sqlx::query_as::<_, CoachAvailabilityDBResponse>(
            r#"
            INSERT INTO coach_availability (id, coach_id, date, start_time, end_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, coach_id, date, start_time, end_time
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.coach_id)
        .bind(request.date)
        .bind(request.start_time)
        .bind(request.end_time)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(availability)
    }

    /// Availability windows for one coach on one date, earliest first.
    #[instrument(skip(self), err)]
    pub async fn availability_for_date(&mut self, coach_id: CoachId, date: NaiveDate) -> Result<Vec<CoachAvailabilityDBResponse>> {
        let windows = sqlx::query_as::<_, CoachAvailabilityDBResponse>(
            r#"
            SELECT id, coach_id, date, start_time, end_time
            FROM coach_availability
            WHERE coach_id = $1 AND date = $2
            ORDER BY start_time ASC
            "#,
        )
        .bind(coach_id)
        .bind(date)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(windows)
    }

    /// Every availability window for one coach, for the admin calendar view.
    #[instrument(skip(self), err)]
    pub async fn availability_all(&mut self, coach_id: CoachId) -> Result<Vec<CoachAvailabilityDBResponse>> {
        let windows = sqlx::query_as::<_, CoachAvailabilityDBResponse>(
            r#"
            SELECT id, coach_id, date, start_time, end_time
            FROM coach_availability
            WHERE coach_id = $1
            ORDER BY date ASC, start_time ASC
            "#,
        )
        .bind(coach_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(windows)
    }
}
