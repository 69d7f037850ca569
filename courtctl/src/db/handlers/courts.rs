//! Database repository for courts.

use crate::db::errors::Result;
use crate::db::models::courts::{CourtCreateDBRequest, CourtDBResponse};
use crate::types::CourtId;
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct Courts<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Courts<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    pub async fn create(&mut self, request: &CourtCreateDBRequest) -> Result<CourtDBResponse> {
        let court = sqlx::query_as::<_, CourtDBResponse>(
            r#"
            INSERT INTO courts (id, name, court_type, base_price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, court_type, base_price, is_active, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(request.court_type)
        .bind(request.base_price)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(court)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_id(&mut self, id: CourtId) -> Result<Option<CourtDBResponse>> {
        let court = sqlx::query_as::<_, CourtDBResponse>(
            r#"
            SELECT id, name, court_type, base_price, is_active, created_at
            FROM courts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(court)
    }

    /// List courts ordered by name; `active_only` restricts to bookable courts.
    #[instrument(skip(self), err)]
    pub async fn list(&mut self, active_only: bool) -> Result<Vec<CourtDBResponse>> {
        let courts = sqlx::query_as::<_, CourtDBResponse>(
            r#"
            SELECT id, name, court_type, base_price, is_active, created_at
            FROM courts
            WHERE is_active OR NOT $1
            ORDER BY name ASC
            "#,
        )
        .bind(active_only)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(courts)
    }

    /// Fetch several courts at once, for resolving booking relations.
    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    pub async fn get_bulk(&mut self, ids: &[CourtId]) -> Result<Vec<CourtDBResponse>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let courts = sqlx::query_as::<_, CourtDBResponse>(
            r#"
            SELECT id, name, court_type, base_price, is_active, created_at
            FROM courts
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(courts)
    }

    /// Flip the active flag; returns `None` when the court does not exist.
    #[instrument(skip(self), err)]
    pub async fn toggle_active(&mut self, id: CourtId) -> Result<Option<CourtDBResponse>> {
        let court = sqlx::query_as::<_, CourtDBResponse>(
            r#"
            UPDATE courts
            SET is_active = NOT is_active
            WHERE id = $1
            RETURNING id, name, court_type, base_price, is_active, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(court)
    }
}
