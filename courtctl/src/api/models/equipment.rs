//! API request/response models for equipment.

use crate::db::models::equipment::EquipmentDBResponse;
use crate::types::EquipmentId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Partial update; omitted fields keep their current value.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentUpdate {
    pub total_quantity: Option<i32>,
    #[schema(value_type = Option<f64>)]
    pub price_per_hour: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: EquipmentId,
    pub name: String,
    pub total_quantity: i32,
    #[schema(value_type = f64)]
    pub price_per_hour: Decimal,
}

impl From<EquipmentDBResponse> for EquipmentResponse {
    fn from(db: EquipmentDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            total_quantity: db.total_quantity,
            price_per_hour: db.price_per_hour,
        }
    }
}
