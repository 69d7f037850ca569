//! Database models for coaches and coach availability.

use crate::api::models::coaches::{CoachAvailabilityCreate, CoachCreate, CoachUpdate};
use crate::types::CoachId;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Database request for creating a coach
#[derive(Debug, Clone)]
pub struct CoachCreateDBRequest {
    pub name: String,
    pub price_per_hour: Decimal,
}

impl From<CoachCreate> for CoachCreateDBRequest {
    fn from(api: CoachCreate) -> Self {
        Self {
            name: api.name,
            price_per_hour: api.price_per_hour,
        }
    }
}

/// Database request for a partial coach update
#[derive(Debug, Clone)]
pub struct CoachUpdateDBRequest {
    pub price_per_hour: Option<Decimal>,
    pub is_active: Option<bool>,
}

impl From<CoachUpdate> for CoachUpdateDBRequest {
    fn from(api: CoachUpdate) -> Self {
        Self {
            price_per_hour: api.price_per_hour,
            is_active: api.is_active,
        }
    }
}

/// Database response for a coach
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CoachDBResponse {
    pub id: CoachId,
    pub name: String,
    pub price_per_hour: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Database request for adding an availability window to a coach
#[derive(Debug, Clone)]
pub struct CoachAvailabilityCreateDBRequest {
    pub coach_id: CoachId,
    pub date: NaiveDate,
    pub start_time: i32,
    pub end_time: i32,
}

impl CoachAvailabilityCreateDBRequest {
    pub fn new(coach_id: CoachId, api: CoachAvailabilityCreate) -> Self {
        Self {
            coach_id,
            date: api.date,
            start_time: api.start_time,
            end_time: api.end_time,
        }
    }
}

/// Database response for an availability window
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CoachAvailabilityDBResponse {
    pub id: Uuid,
    pub coach_id: CoachId,
    pub date: NaiveDate,
    pub start_time: i32,
    pub end_time: i32,
}
