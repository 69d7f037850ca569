//! Database repository for equipment.

use crate::db::errors::Result;
use crate::db::models::equipment::{EquipmentCreateDBRequest, EquipmentDBResponse, EquipmentUpdateDBRequest};
use crate::types::EquipmentId;
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct Equipment<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Equipment<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    pub async fn create(&mut self, request: &EquipmentCreateDBRequest) -> Result<EquipmentDBResponse> {
        let equipment = sqlx::query_as::<_, EquipmentDBResponse>(
            r#"
            INSERT INTO equipment (id, name, total_quantity, price_per_hour)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, total_quantity, price_per_hour, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(request.total_quantity)
        .bind(request.price_per_hour)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(equipment)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_id(&mut self, id: EquipmentId) -> Result<Option<EquipmentDBResponse>> {
        let equipment = sqlx::query_as::<_, EquipmentDBResponse>(
            r#"
            SELECT id, name, total_quantity, price_per_hour, created_at
            FROM equipment
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(equipment)
    }

    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<EquipmentDBResponse>> {
        let equipment = sqlx::query_as::<_, EquipmentDBResponse>(
            r#"
            SELECT id, name, total_quantity, price_per_hour, created_at
            FROM equipment
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(equipment)
    }

    /// Partial update; `None` fields keep their current value. Returns
    /// `None` when the equipment does not exist.
    #[instrument(skip(self, request), err)]
    pub async fn update(&mut self, id: EquipmentId, request: &EquipmentUpdateDBRequest) -> Result<Option<EquipmentDBResponse>> {
        let equipment = sqlx::query_as::<_, EquipmentDBResponse>(
            r#"
            UPDATE equipment
            SET total_quantity = COALESCE($2, total_quantity),
                price_per_hour = COALESCE($3, price_per_hour)
            WHERE id = $1
            RETURNING id, name, total_quantity, price_per_hour, created_at
            "#,
        )
        .bind(id)
        .bind(request.total_quantity)
        .bind(request.price_per_hour)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(equipment)
    }
}
