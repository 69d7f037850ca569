//! The booking orchestrator: one atomic create-booking operation.
//!
//! [`create_booking`] is the only producer of CONFIRMED bookings. It runs
//! every availability check, the price computation and the final insert on
//! a single PostgreSQL transaction with isolation level SERIALIZABLE, so
//! the conflict check and the commit form one unit of work. Two concurrent
//! requests for overlapping windows on the same court cannot both commit:
//! one of them fails with a serialization error (SQLSTATE 40001), which
//! surfaces as a retryable persistence failure and leaves no state behind.
//!
//! Every business-rule failure (validation, missing court, conflict,
//! equipment capacity, coach window) aborts before any write; the
//! transaction is simply dropped, so the store is untouched on every
//! error path.

use crate::api::models::bookings::{BookingCreate, BookingEquipmentResponse, BookingResponse};
use crate::api::models::coaches::CoachResponse;
use crate::api::models::courts::CourtResponse;
use crate::availability::{coach_window_available, equipment_is_available};
use crate::config::FacilityConfig;
use crate::db::errors::DbError;
use crate::db::handlers::{Bookings, Coaches, Courts, Equipment, PricingRules};
use crate::db::models::bookings::{BookingCreateDBRequest, BookingEquipmentCreateDBRequest};
use crate::db::models::equipment::EquipmentDBResponse;
use crate::errors::{Error, Result};
use crate::pricing::{self, EquipmentLine, PriceBreakdown, PricingContext};
use crate::types::{UserId, abbrev_uuid};
use sqlx::PgPool;
use tracing::{debug, instrument};

/// A committed booking with its resolved relations, plus the pricing
/// breakdown that produced its total.
#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub booking: BookingResponse,
    pub pricing: PriceBreakdown,
}

/// Reject malformed windows before touching the store.
pub fn validate_window(hours: &FacilityConfig, start_time: i32, end_time: i32) -> Result<()> {
    if start_time >= end_time {
        return Err(Error::Validation {
            message: "startTime must be before endTime".to_string(),
        });
    }
    if start_time < hours.open_hour || end_time > hours.close_hour {
        return Err(Error::Validation {
            message: format!(
                "Booking window must fall within facility operating hours ({}:00-{}:00)",
                hours.open_hour, hours.close_hour
            ),
        });
    }
    Ok(())
}

/// Create a booking atomically.
///
/// Precondition order follows the contract: window validation, court
/// existence/activity, court conflict, equipment capacity, coach window,
/// pricing, insert. All reads and the insert share one SERIALIZABLE
/// transaction.
#[instrument(skip(pool, hours, request), fields(user_id = %user_id, court_id = %request.court_id, date = %request.date), err)]
pub async fn create_booking(pool: &PgPool, hours: &FacilityConfig, user_id: UserId, request: BookingCreate) -> Result<BookingOutcome> {
    validate_window(hours, request.start_time, request.end_time)?;
    for line in &request.equipment {
        if line.quantity <= 0 {
            return Err(Error::Validation {
                message: "Equipment quantity must be positive".to_string(),
            });
        }
    }

    let mut tx = pool.begin().await.map_err(DbError::from)?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

    // Court must exist and be bookable; a disabled court is reported the
    // same way as a missing one.
    let court = Courts::new(&mut tx)
        .get_by_id(request.court_id)
        .await?
        .filter(|c| c.is_active)
        .ok_or_else(|| Error::NotFound {
            resource: "Court".to_string(),
            id: request.court_id.to_string(),
        })?;

    if Bookings::new(&mut tx)
        .find_conflict(request.court_id, request.date, request.start_time, request.end_time)
        .await?
        .is_some()
    {
        return Err(Error::Conflict {
            message: "Court is already booked for an overlapping time slot".to_string(),
        });
    }

    let mut resolved_equipment: Vec<(EquipmentDBResponse, i32)> = Vec::with_capacity(request.equipment.len());
    for line in &request.equipment {
        let equipment = Equipment::new(&mut tx)
            .get_by_id(line.equipment_id)
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "Equipment".to_string(),
                id: line.equipment_id.to_string(),
            })?;

        if !equipment_is_available(&equipment, line.quantity) {
            return Err(Error::ResourceUnavailable {
                message: format!("Equipment {} is not available in the requested quantity", equipment.name),
            });
        }

        resolved_equipment.push((equipment, line.quantity));
    }

    let coach = match request.coach_id {
        Some(coach_id) => {
            let coach = Coaches::new(&mut tx)
                .get_by_id(coach_id)
                .await?
                .filter(|c| c.is_active)
                .ok_or_else(|| Error::NotFound {
                    resource: "Coach".to_string(),
                    id: coach_id.to_string(),
                })?;

            let windows = Coaches::new(&mut tx).availability_for_date(coach_id, request.date).await?;
            if !coach_window_available(&windows, request.start_time, request.end_time) {
                return Err(Error::CoachUnavailable {
                    message: format!("Coach {} is not available for the requested time slot", coach.name),
                });
            }

            Some(coach)
        }
        None => None,
    };

    // Rules are read inside the transaction, fresh on every computation
    let rules = PricingRules::new(&mut tx).list_active().await?;
    let context = PricingContext {
        court_type: court.court_type,
        date: request.date,
        start_time: request.start_time,
        end_time: request.end_time,
    };
    let lines: Vec<EquipmentLine> = resolved_equipment
        .iter()
        .map(|(equipment, quantity)| EquipmentLine {
            price_per_hour: equipment.price_per_hour,
            quantity: *quantity,
        })
        .collect();
    let breakdown = pricing::compute_price(
        &context,
        court.base_price,
        &rules,
        &lines,
        coach.as_ref().map(|c| c.price_per_hour),
    );

    let booking = Bookings::new(&mut tx)
        .create(&BookingCreateDBRequest {
            user_id,
            court_id: request.court_id,
            coach_id: request.coach_id,
            date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
            total_price: breakdown.total_price,
            equipment: request
                .equipment
                .iter()
                .map(|line| BookingEquipmentCreateDBRequest {
                    equipment_id: line.equipment_id,
                    quantity: line.quantity,
                })
                .collect(),
        })
        .await?;

    tx.commit().await.map_err(DbError::from)?;

    debug!(
        booking = %abbrev_uuid(&booking.id),
        total = %breakdown.total_price,
        "Booking committed"
    );

    let equipment_responses = resolved_equipment
        .into_iter()
        .map(|(equipment, quantity)| BookingEquipmentResponse {
            equipment_id: equipment.id,
            name: equipment.name,
            quantity,
            price_per_hour: equipment.price_per_hour,
        })
        .collect();

    let booking = BookingResponse {
        id: booking.id,
        user_id: booking.user_id,
        court_id: booking.court_id,
        coach_id: booking.coach_id,
        date: booking.date,
        start_time: booking.start_time,
        end_time: booking.end_time,
        status: booking.status,
        total_price: booking.total_price,
        created_at: booking.created_at,
        court: CourtResponse::from(court),
        coach: coach.map(CoachResponse::from),
        equipment: equipment_responses,
    };

    Ok(BookingOutcome {
        booking,
        pricing: breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::bookings::{BookingStatus, EquipmentRequest};
    use crate::api::models::courts::CourtType;
    use crate::api::models::users::Role;
    use crate::test_utils::{
        add_test_availability, create_test_coach, create_test_court, create_test_equipment, create_test_rule, create_test_user,
        seed_standard_rules, test_date, test_weekday,
    };
    use rust_decimal_macros::dec;
    use sqlx::PgPool;
    use uuid::Uuid;

    fn facility() -> FacilityConfig {
        FacilityConfig::default()
    }

    fn booking_request(court_id: Uuid, start_time: i32, end_time: i32) -> BookingCreate {
        BookingCreate {
            court_id,
            date: test_date(),
            start_time,
            end_time,
            equipment: vec![],
            coach_id: None,
        }
    }

    async fn booking_count(pool: &PgPool) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[test]
    fn window_validation_rejects_malformed_requests() {
        let hours = facility();
        assert!(validate_window(&hours, 10, 12).is_ok());
        assert!(validate_window(&hours, 6, 22).is_ok());

        assert!(matches!(validate_window(&hours, 12, 12), Err(Error::Validation { .. })));
        assert!(matches!(validate_window(&hours, 14, 12), Err(Error::Validation { .. })));
        assert!(matches!(validate_window(&hours, 5, 7), Err(Error::Validation { .. })));
        assert!(matches!(validate_window(&hours, 21, 23), Err(Error::Validation { .. })));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn indoor_weekend_peak_booking_prices_the_reference_scenario(pool: PgPool) {
        let user = create_test_user(&pool, Role::User).await;
        let court = create_test_court(&pool, CourtType::Indoor, dec!(500)).await;
        let rackets = create_test_equipment(&pool, "Racket", 10, dec!(50)).await;
        let coach = create_test_coach(&pool, dec!(200)).await;
        add_test_availability(&pool, coach.id, test_date(), 6, 22).await;
        seed_standard_rules(&pool).await;

        // test_date() is a Saturday; 18-20 overlaps the peak band
        let mut request = booking_request(court.id, 18, 20);
        request.equipment = vec![EquipmentRequest {
            equipment_id: rackets.id,
            quantity: 2,
        }];
        request.coach_id = Some(coach.id);

        let outcome = create_booking(&pool, &facility(), user.id, request).await.unwrap();

        assert_eq!(outcome.pricing.base_price, dec!(1000));
        assert_eq!(outcome.pricing.multiplier, dec!(2.34));
        assert_eq!(outcome.pricing.equipment_cost, dec!(200));
        assert_eq!(outcome.pricing.coach_cost, dec!(400));
        assert_eq!(outcome.pricing.total_price, dec!(2940));

        let booking = &outcome.booking;
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.total_price, dec!(2940));
        assert_eq!(booking.court.id, court.id);
        assert_eq!(booking.coach.as_ref().unwrap().id, coach.id);
        assert_eq!(booking.equipment.len(), 1);
        assert_eq!(booking.equipment[0].quantity, 2);
        assert_eq!(booking.equipment[0].name, "Racket");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn overlapping_booking_conflicts_adjacent_succeeds(pool: PgPool) {
        let user = create_test_user(&pool, Role::User).await;
        let court = create_test_court(&pool, CourtType::Indoor, dec!(500)).await;

        create_booking(&pool, &facility(), user.id, booking_request(court.id, 18, 20))
            .await
            .unwrap();

        let overlap = create_booking(&pool, &facility(), user.id, booking_request(court.id, 19, 21)).await;
        assert!(matches!(overlap, Err(Error::Conflict { .. })));

        // Adjacent window shares only the endpoint
        create_booking(&pool, &facility(), user.id, booking_request(court.id, 20, 22))
            .await
            .unwrap();

        assert_eq!(booking_count(&pool).await, 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn same_window_on_another_court_or_date_succeeds(pool: PgPool) {
        let user = create_test_user(&pool, Role::User).await;
        let court_a = create_test_court(&pool, CourtType::Indoor, dec!(500)).await;
        let court_b = create_test_court(&pool, CourtType::Outdoor, dec!(300)).await;

        create_booking(&pool, &facility(), user.id, booking_request(court_a.id, 18, 20))
            .await
            .unwrap();

        create_booking(&pool, &facility(), user.id, booking_request(court_b.id, 18, 20))
            .await
            .unwrap();

        let mut next_day = booking_request(court_a.id, 18, 20);
        next_day.date = test_weekday();
        create_booking(&pool, &facility(), user.id, next_day).await.unwrap();

        assert_eq!(booking_count(&pool).await, 3);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn missing_or_disabled_court_is_not_found(pool: PgPool) {
        let user = create_test_user(&pool, Role::User).await;

        let missing = create_booking(&pool, &facility(), user.id, booking_request(Uuid::new_v4(), 10, 12)).await;
        assert!(matches!(missing, Err(Error::NotFound { .. })));

        let court = create_test_court(&pool, CourtType::Indoor, dec!(500)).await;
        let mut conn = pool.acquire().await.unwrap();
        Courts::new(&mut conn).toggle_active(court.id).await.unwrap();
        drop(conn);

        let disabled = create_booking(&pool, &facility(), user.id, booking_request(court.id, 10, 12)).await;
        assert!(matches!(disabled, Err(Error::NotFound { .. })));
        assert_eq!(booking_count(&pool).await, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn excessive_equipment_quantity_aborts_without_state_change(pool: PgPool) {
        let user = create_test_user(&pool, Role::User).await;
        let court = create_test_court(&pool, CourtType::Indoor, dec!(500)).await;
        let rackets = create_test_equipment(&pool, "Racket", 10, dec!(50)).await;

        let mut request = booking_request(court.id, 10, 12);
        request.equipment = vec![EquipmentRequest {
            equipment_id: rackets.id,
            quantity: 11,
        }];

        let result = create_booking(&pool, &facility(), user.id, request).await;
        assert!(matches!(result, Err(Error::ResourceUnavailable { .. })));

        // The failed attempt left nothing behind
        assert_eq!(booking_count(&pool).await, 0);
        let line_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM booking_equipment")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(line_count, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn unknown_equipment_is_not_found(pool: PgPool) {
        let user = create_test_user(&pool, Role::User).await;
        let court = create_test_court(&pool, CourtType::Indoor, dec!(500)).await;

        let mut request = booking_request(court.id, 10, 12);
        request.equipment = vec![EquipmentRequest {
            equipment_id: Uuid::new_v4(),
            quantity: 1,
        }];

        let result = create_booking(&pool, &facility(), user.id, request).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        assert_eq!(booking_count(&pool).await, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn coach_window_must_contain_the_slot(pool: PgPool) {
        let user = create_test_user(&pool, Role::User).await;
        let court = create_test_court(&pool, CourtType::Indoor, dec!(500)).await;
        let coach = create_test_coach(&pool, dec!(200)).await;
        add_test_availability(&pool, coach.id, test_date(), 10, 18).await;

        // 17-19 is only partially inside the 10-18 window
        let mut request = booking_request(court.id, 17, 19);
        request.coach_id = Some(coach.id);
        let result = create_booking(&pool, &facility(), user.id, request).await;
        assert!(matches!(result, Err(Error::CoachUnavailable { .. })));
        assert_eq!(booking_count(&pool).await, 0);

        // 12-14 is fully contained
        let mut request = booking_request(court.id, 12, 14);
        request.coach_id = Some(coach.id);
        create_booking(&pool, &facility(), user.id, request).await.unwrap();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn unknown_coach_is_not_found(pool: PgPool) {
        let user = create_test_user(&pool, Role::User).await;
        let court = create_test_court(&pool, CourtType::Indoor, dec!(500)).await;

        let mut request = booking_request(court.id, 10, 12);
        request.coach_id = Some(Uuid::new_v4());

        let result = create_booking(&pool, &facility(), user.id, request).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn rule_changes_apply_to_the_next_booking(pool: PgPool) {
        let user = create_test_user(&pool, Role::User).await;
        let court = create_test_court(&pool, CourtType::Indoor, dec!(500)).await;

        // No rules yet: 2 weekday hours at base price. test_weekday() avoids
        // the weekend rule created below.
        let mut request = booking_request(court.id, 10, 12);
        request.date = test_weekday();
        let before = create_booking(&pool, &facility(), user.id, request).await.unwrap();
        assert_eq!(before.pricing.total_price, dec!(1000));

        create_test_rule(&pool, "INDOOR", dec!(1.3)).await;

        let mut request = booking_request(court.id, 12, 14);
        request.date = test_weekday();
        let after = create_booking(&pool, &facility(), user.id, request).await.unwrap();
        assert_eq!(after.pricing.multiplier, dec!(1.3));
        assert_eq!(after.pricing.total_price, dec!(1300));
    }
}
