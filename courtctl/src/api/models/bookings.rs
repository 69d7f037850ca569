//! API request/response models for bookings.

use super::{coaches::CoachResponse, courts::CourtResponse};
use crate::pricing::PriceBreakdown;
use crate::types::{BookingId, CoachId, CourtId, EquipmentId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Booking lifecycle state. Creation only ever produces `Confirmed`;
/// `Cancelled` exists for forward compatibility with the cancellation flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

/// One requested equipment line: which equipment type, and how many units.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRequest {
    #[schema(value_type = String, format = "uuid")]
    pub equipment_id: EquipmentId,
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreate {
    #[schema(value_type = String, format = "uuid")]
    pub court_id: CourtId,
    pub date: NaiveDate,
    /// Starting hour, 0-23
    pub start_time: i32,
    /// Ending hour (exclusive), must be greater than `startTime`
    pub end_time: i32,
    #[serde(default)]
    pub equipment: Vec<EquipmentRequest>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub coach_id: Option<CoachId>,
}

/// Equipment line on a committed booking, with the equipment resolved.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingEquipmentResponse {
    #[schema(value_type = String, format = "uuid")]
    pub equipment_id: EquipmentId,
    pub name: String,
    pub quantity: i32,
    #[schema(value_type = f64)]
    pub price_per_hour: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: BookingId,
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    #[schema(value_type = String, format = "uuid")]
    pub court_id: CourtId,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub coach_id: Option<CoachId>,
    pub date: NaiveDate,
    pub start_time: i32,
    pub end_time: i32,
    pub status: BookingStatus,
    #[schema(value_type = f64)]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub court: CourtResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coach: Option<CoachResponse>,
    pub equipment: Vec<BookingEquipmentResponse>,
}

/// The pricing breakdown that produced a booking's total.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdownResponse {
    #[schema(value_type = f64)]
    pub base_price: Decimal,
    #[schema(value_type = f64)]
    pub multiplier: Decimal,
    #[schema(value_type = f64)]
    pub equipment_cost: Decimal,
    #[schema(value_type = f64)]
    pub coach_cost: Decimal,
    #[schema(value_type = f64)]
    pub total_price: Decimal,
}

/// Successful booking creation: the committed booking plus its pricing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingOutcomeResponse {
    pub booking: BookingResponse,
    pub pricing: PriceBreakdownResponse,
}

impl From<PriceBreakdown> for PriceBreakdownResponse {
    fn from(breakdown: PriceBreakdown) -> Self {
        Self {
            base_price: breakdown.base_price,
            multiplier: breakdown.multiplier,
            equipment_cost: breakdown.equipment_cost,
            coach_cost: breakdown.coach_cost,
            total_price: breakdown.total_price,
        }
    }
}
