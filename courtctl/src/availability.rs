//! Availability predicates for the three resource kinds.
//!
//! Each resource kind has its own availability semantics:
//!
//! - **Courts** are exclusive per time interval: a court is free for a
//!   window iff no CONFIRMED booking overlaps it. The row lookup lives in
//!   [`crate::db::handlers::Bookings::find_conflict`]; the interval math
//!   is [`windows_overlap`].
//! - **Equipment** is a quantity pool: a request is satisfiable iff the
//!   requested quantity does not exceed the equipment's total stock. This
//!   is a static capacity check, not a per-slot allocation check —
//!   overlapping bookings each draw from the full pool.
//! - **Coaches** are offered in explicit windows: a coach is available
//!   for a slot iff at least one availability row for that date fully
//!   contains it.
//!
//! All functions here are pure; the orchestrator feeds them rows fetched
//! inside its transaction.

use crate::db::models::coaches::CoachAvailabilityDBResponse;
use crate::db::models::equipment::EquipmentDBResponse;

/// Half-open interval overlap: `[a_start, a_end)` and `[b_start, b_end)`
/// overlap iff `a_start < b_end && b_start < a_end`. Adjacent intervals
/// do not overlap.
pub fn windows_overlap(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> bool {
    a_start < b_end && b_start < a_end
}

/// Whether `[outer_start, outer_end)` fully contains `[inner_start, inner_end)`.
pub fn window_contains(outer_start: i32, outer_end: i32, inner_start: i32, inner_end: i32) -> bool {
    outer_start <= inner_start && outer_end >= inner_end
}

/// Static capacity check: the requested quantity must be positive and
/// within the equipment's total stock.
pub fn equipment_is_available(equipment: &EquipmentDBResponse, requested_quantity: i32) -> bool {
    requested_quantity > 0 && requested_quantity <= equipment.total_quantity
}

/// True iff some availability window fully contains `[start_time, end_time)`.
/// Two adjoining windows that only cover the slot together do not count.
pub fn coach_window_available(windows: &[CoachAvailabilityDBResponse], start_time: i32, end_time: i32) -> bool {
    windows
        .iter()
        .any(|w| window_contains(w.start_time, w.end_time, start_time, end_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn equipment(total_quantity: i32) -> EquipmentDBResponse {
        EquipmentDBResponse {
            id: Uuid::new_v4(),
            name: "Racket".to_string(),
            total_quantity,
            price_per_hour: dec!(50),
            created_at: Utc::now(),
        }
    }

    fn window(start_time: i32, end_time: i32) -> CoachAvailabilityDBResponse {
        CoachAvailabilityDBResponse {
            id: Uuid::new_v4(),
            coach_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
            start_time,
            end_time,
        }
    }

    #[test]
    fn overlap_is_half_open() {
        assert!(windows_overlap(18, 20, 19, 21));
        assert!(windows_overlap(19, 21, 18, 20));
        assert!(windows_overlap(18, 20, 18, 20));
        assert!(windows_overlap(18, 20, 19, 20));

        // Adjacent windows share an endpoint but not an hour
        assert!(!windows_overlap(18, 20, 20, 22));
        assert!(!windows_overlap(20, 22, 18, 20));
        assert!(!windows_overlap(6, 8, 10, 12));
    }

    #[test]
    fn containment_includes_exact_match() {
        assert!(window_contains(10, 18, 10, 18));
        assert!(window_contains(10, 18, 12, 14));
        assert!(!window_contains(10, 18, 9, 11));
        assert!(!window_contains(10, 18, 17, 19));
    }

    #[test]
    fn equipment_check_is_against_static_total() {
        let racket = equipment(10);
        assert!(equipment_is_available(&racket, 1));
        assert!(equipment_is_available(&racket, 10));
        assert!(!equipment_is_available(&racket, 11));
        assert!(!equipment_is_available(&racket, 0));
        assert!(!equipment_is_available(&racket, -3));
    }

    #[test]
    fn coach_needs_a_single_containing_window() {
        // Coach available 10-18: a 17-19 request is not contained
        assert!(coach_window_available(&[window(10, 18)], 12, 14));
        assert!(!coach_window_available(&[window(10, 18)], 17, 19));

        // Two adjoining windows never merge
        assert!(!coach_window_available(&[window(10, 12), window(12, 14)], 11, 13));
        assert!(coach_window_available(&[window(10, 12), window(12, 14)], 12, 14));

        assert!(!coach_window_available(&[], 10, 12));
    }
}
