//! API request/response models for coaches and their availability windows.

use crate::db::models::coaches::{CoachAvailabilityDBResponse, CoachDBResponse};
use crate::types::CoachId;
use chrono::NaiveDate;
use uuid::Uuid;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachCreate {
    pub name: String,
    #[schema(value_type = f64)]
    pub price_per_hour: Decimal,
}

/// Partial update; omitted fields keep their current value.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachUpdate {
    #[schema(value_type = Option<f64>)]
    pub price_per_hour: Option<Decimal>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: CoachId,
    pub name: String,
    #[schema(value_type = f64)]
    pub price_per_hour: Decimal,
    pub is_active: bool,
}

/// An offered window `[startTime, endTime)` on a calendar date, in whole hours.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachAvailabilityCreate {
    pub date: NaiveDate,
    pub start_time: i32,
    pub end_time: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachAvailabilityResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    #[schema(value_type = String, format = "uuid")]
    pub coach_id: CoachId,
    pub date: NaiveDate,
    pub start_time: i32,
    pub end_time: i32,
}

/// Query parameters for the public availability listing
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
}

impl From<CoachDBResponse> for CoachResponse {
    fn from(db: CoachDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            price_per_hour: db.price_per_hour,
            is_active: db.is_active,
        }
    }
}

impl From<CoachAvailabilityDBResponse> for CoachAvailabilityResponse {
    fn from(db: CoachAvailabilityDBResponse) -> Self {
        Self {
            id: db.id,
            coach_id: db.coach_id,
            date: db.date,
            start_time: db.start_time,
            end_time: db.end_time,
        }
    }
}
