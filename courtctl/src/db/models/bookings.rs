//! Database models for bookings and their equipment line-items.

use crate::api::models::bookings::BookingStatus;
use crate::types::{BookingId, CoachId, CourtId, EquipmentId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// One equipment line to persist alongside a booking
#[derive(Debug, Clone)]
pub struct BookingEquipmentCreateDBRequest {
    pub equipment_id: EquipmentId,
    pub quantity: i32,
}

/// Database request for the atomic booking insert. `total_price` is the
/// pricing engine's output; callers never supply it directly.
#[derive(Debug, Clone)]
pub struct BookingCreateDBRequest {
    pub user_id: UserId,
    pub court_id: CourtId,
    pub coach_id: Option<CoachId>,
    pub date: NaiveDate,
    pub start_time: i32,
    pub end_time: i32,
    pub total_price: Decimal,
    pub equipment: Vec<BookingEquipmentCreateDBRequest>,
}

/// Database response for a booking row (relations not resolved)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingDBResponse {
    pub id: BookingId,
    pub user_id: UserId,
    pub court_id: CourtId,
    pub coach_id: Option<CoachId>,
    pub date: NaiveDate,
    pub start_time: i32,
    pub end_time: i32,
    pub status: BookingStatus,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// An equipment line joined with its equipment row, for building responses
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingEquipmentLineDBResponse {
    pub booking_id: BookingId,
    pub equipment_id: EquipmentId,
    pub equipment_name: String,
    pub quantity: i32,
    pub price_per_hour: Decimal,
}
