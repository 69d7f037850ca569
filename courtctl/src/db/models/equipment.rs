//! Database models for equipment.

use crate::api::models::equipment::EquipmentUpdate;
use crate::types::EquipmentId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Database request for creating an equipment type (seeding and tests)
#[derive(Debug, Clone)]
pub struct EquipmentCreateDBRequest {
    pub name: String,
    pub total_quantity: i32,
    pub price_per_hour: Decimal,
}

/// Database request for a partial equipment update
#[derive(Debug, Clone)]
pub struct EquipmentUpdateDBRequest {
    pub total_quantity: Option<i32>,
    pub price_per_hour: Option<Decimal>,
}

impl From<EquipmentUpdate> for EquipmentUpdateDBRequest {
    fn from(api: EquipmentUpdate) -> Self {
        Self {
            total_quantity: api.total_quantity,
            price_per_hour: api.price_per_hour,
        }
    }
}

/// Database response for an equipment type
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EquipmentDBResponse {
    pub id: EquipmentId,
    pub name: String,
    pub total_quantity: i32,
    pub price_per_hour: Decimal,
    pub created_at: DateTime<Utc>,
}
