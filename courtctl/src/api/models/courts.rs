//! API request/response models for courts.

use crate::db::models::courts::CourtDBResponse;
use crate::types::CourtId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Physical court type; indoor courts can attract a pricing premium.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "court_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CourtType {
    Indoor,
    Outdoor,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourtCreate {
    pub name: String,
    pub court_type: CourtType,
    #[schema(value_type = f64)]
    pub base_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourtResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: CourtId,
    pub name: String,
    pub court_type: CourtType,
    #[schema(value_type = f64)]
    pub base_price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CourtDBResponse> for CourtResponse {
    fn from(db: CourtDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            court_type: db.court_type,
            base_price: db.base_price,
            is_active: db.is_active,
            created_at: db.created_at,
        }
    }
}
