//! Database models for courts.

use crate::api::models::courts::{CourtCreate, CourtType};
use crate::types::CourtId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Database request for creating a new court
#[derive(Debug, Clone)]
pub struct CourtCreateDBRequest {
    pub name: String,
    pub court_type: CourtType,
    pub base_price: Decimal,
}

impl From<CourtCreate> for CourtCreateDBRequest {
    fn from(api: CourtCreate) -> Self {
        Self {
            name: api.name,
            court_type: api.court_type,
            base_price: api.base_price,
        }
    }
}

/// Database response for a court
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CourtDBResponse {
    pub id: CourtId,
    pub name: String,
    pub court_type: CourtType,
    pub base_price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
