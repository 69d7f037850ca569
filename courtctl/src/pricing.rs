//! The pricing engine.
//!
//! A booking's price is the court's hourly base price times the booked
//! hours, scaled by the product of every applicable active rule's
//! multiplier, plus equipment and coach costs. The computation is a pure
//! function of its inputs; the caller supplies the active rule set, which
//! it must read fresh from the store at call time (see
//! [`crate::db::handlers::PricingRules::list_active`]).

use crate::api::models::courts::CourtType;
use crate::db::models::pricing_rules::PricingRuleDBResponse;
use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Peak band is 18:00-21:00; a rule of kind `PeakHour` applies on any
/// overlap with it, not only full containment.
const PEAK_START: i32 = 18;
const PEAK_END: i32 = 21;

/// The facts a rule predicate can look at.
#[derive(Debug, Clone, Copy)]
pub struct PricingContext {
    pub court_type: CourtType,
    pub date: NaiveDate,
    pub start_time: i32,
    pub end_time: i32,
}

/// One equipment line as it enters the price computation.
#[derive(Debug, Clone)]
pub struct EquipmentLine {
    pub price_per_hour: Decimal,
    pub quantity: i32,
}

/// Rule kinds the engine understands, parsed from the stored `rule_type`
/// text. Types added by a newer deployment parse to [`RuleKind::Other`]
/// and never apply, so old binaries price new rule sets safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    PeakHour,
    Weekend,
    Indoor,
    Other,
}

impl RuleKind {
    pub fn parse(rule_type: &str) -> Self {
        match rule_type {
            "PEAK_HOUR" => RuleKind::PeakHour,
            "WEEKEND" => RuleKind::Weekend,
            "INDOOR" => RuleKind::Indoor,
            _ => RuleKind::Other,
        }
    }

    /// Whether this rule's multiplier applies to the given booking.
    pub fn applies(&self, ctx: &PricingContext) -> bool {
        match self {
            RuleKind::Indoor => ctx.court_type == CourtType::Indoor,
            RuleKind::PeakHour => ctx.start_time < PEAK_END && ctx.end_time > PEAK_START,
            RuleKind::Weekend => matches!(ctx.date.weekday(), Weekday::Sat | Weekday::Sun),
            RuleKind::Other => false,
        }
    }
}

/// The result of a price computation.
///
/// `base_price` and the cost components are unrounded; only `total_price`
/// is rounded, to the nearest integer currency unit with midpoints away
/// from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: Decimal,
    pub multiplier: Decimal,
    pub equipment_cost: Decimal,
    pub coach_cost: Decimal,
    pub total_price: Decimal,
}

/// Compute the price for a booking window.
///
/// Applicable rule multipliers compose multiplicatively, so the result
/// does not depend on rule order; callers still pass rules in a
/// deterministic order to keep traces reproducible.
pub fn compute_price(
    ctx: &PricingContext,
    base_price_per_hour: Decimal,
    rules: &[PricingRuleDBResponse],
    equipment: &[EquipmentLine],
    coach_price_per_hour: Option<Decimal>,
) -> PriceBreakdown {
    let hours = Decimal::from(ctx.end_time - ctx.start_time);

    let base_price = base_price_per_hour * hours;

    let mut multiplier = Decimal::ONE;
    for rule in rules {
        if RuleKind::parse(&rule.rule_type).applies(ctx) {
            multiplier *= rule.multiplier;
        }
    }

    let court_total = base_price * multiplier;

    let equipment_cost: Decimal = equipment
        .iter()
        .map(|line| line.price_per_hour * Decimal::from(line.quantity) * hours)
        .sum();

    let coach_cost = coach_price_per_hour.map_or(Decimal::ZERO, |price| price * hours);

    let total_price = (court_total + equipment_cost + coach_cost).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    PriceBreakdown {
        base_price,
        multiplier,
        equipment_cost,
        coach_cost,
        total_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn rule(rule_type: &str, multiplier: Decimal) -> PricingRuleDBResponse {
        PricingRuleDBResponse {
            id: Uuid::new_v4(),
            name: rule_type.to_string(),
            rule_type: rule_type.to_string(),
            multiplier,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn standard_rules() -> Vec<PricingRuleDBResponse> {
        vec![
            rule("PEAK_HOUR", dec!(1.5)),
            rule("WEEKEND", dec!(1.2)),
            rule("INDOOR", dec!(1.3)),
        ]
    }

    // 2025-01-04 is a Saturday, 2025-01-08 a Wednesday
    fn saturday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 4).unwrap()
    }

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()
    }

    fn ctx(court_type: CourtType, date: NaiveDate, start_time: i32, end_time: i32) -> PricingContext {
        PricingContext {
            court_type,
            date,
            start_time,
            end_time,
        }
    }

    #[test]
    fn all_three_rules_compose_multiplicatively() {
        // Indoor court, Saturday 18-20: every rule applies
        let breakdown = compute_price(
            &ctx(CourtType::Indoor, saturday(), 18, 20),
            dec!(500),
            &standard_rules(),
            &[EquipmentLine {
                price_per_hour: dec!(50),
                quantity: 2,
            }],
            Some(dec!(200)),
        );

        assert_eq!(breakdown.base_price, dec!(1000));
        assert_eq!(breakdown.multiplier, dec!(2.34));
        assert_eq!(breakdown.equipment_cost, dec!(200));
        assert_eq!(breakdown.coach_cost, dec!(400));
        // round(1000 * 2.34 + 200 + 400)
        assert_eq!(breakdown.total_price, dec!(2940));
    }

    #[test]
    fn no_rule_applies_off_peak_weekday_outdoor() {
        let breakdown = compute_price(
            &ctx(CourtType::Outdoor, wednesday(), 10, 12),
            dec!(300),
            &standard_rules(),
            &[],
            None,
        );

        assert_eq!(breakdown.base_price, dec!(600));
        assert_eq!(breakdown.multiplier, Decimal::ONE);
        assert_eq!(breakdown.equipment_cost, Decimal::ZERO);
        assert_eq!(breakdown.coach_cost, Decimal::ZERO);
        assert_eq!(breakdown.total_price, dec!(600));
    }

    #[test]
    fn peak_rule_applies_on_any_overlap() {
        let rules = vec![rule("PEAK_HOUR", dec!(1.5))];

        // 17-19 overlaps the 18-21 band and is charged the full multiplier
        let partial = compute_price(&ctx(CourtType::Outdoor, wednesday(), 17, 19), dec!(300), &rules, &[], None);
        assert_eq!(partial.multiplier, dec!(1.5));

        // 21-22 starts exactly when the band ends
        let after = compute_price(&ctx(CourtType::Outdoor, wednesday(), 21, 22), dec!(300), &rules, &[], None);
        assert_eq!(after.multiplier, Decimal::ONE);

        // 16-18 ends exactly when the band starts
        let before = compute_price(&ctx(CourtType::Outdoor, wednesday(), 16, 18), dec!(300), &rules, &[], None);
        assert_eq!(before.multiplier, Decimal::ONE);
    }

    #[test]
    fn weekend_rule_checks_the_calendar_date() {
        let rules = vec![rule("WEEKEND", dec!(1.2))];

        let saturday_booking = compute_price(&ctx(CourtType::Outdoor, saturday(), 10, 12), dec!(300), &rules, &[], None);
        assert_eq!(saturday_booking.multiplier, dec!(1.2));

        let sunday = saturday().succ_opt().unwrap();
        let sunday_booking = compute_price(&ctx(CourtType::Outdoor, sunday, 10, 12), dec!(300), &rules, &[], None);
        assert_eq!(sunday_booking.multiplier, dec!(1.2));

        let weekday_booking = compute_price(&ctx(CourtType::Outdoor, wednesday(), 10, 12), dec!(300), &rules, &[], None);
        assert_eq!(weekday_booking.multiplier, Decimal::ONE);
    }

    #[test]
    fn unrecognized_rule_types_are_ignored() {
        let rules = vec![rule("LOYALTY_DISCOUNT", dec!(0.5)), rule("INDOOR", dec!(1.3))];

        let breakdown = compute_price(&ctx(CourtType::Indoor, wednesday(), 10, 12), dec!(500), &rules, &[], None);
        assert_eq!(breakdown.multiplier, dec!(1.3));
    }

    #[test]
    fn identical_inputs_price_identically() {
        let rules = standard_rules();
        let context = ctx(CourtType::Indoor, saturday(), 18, 20);
        let equipment = [EquipmentLine {
            price_per_hour: dec!(30),
            quantity: 1,
        }];

        let first = compute_price(&context, dec!(500), &rules, &equipment, Some(dec!(250)));
        let second = compute_price(&context, dec!(500), &rules, &equipment, Some(dec!(250)));
        assert_eq!(first, second);
    }

    #[test]
    fn total_rounds_to_integer_units() {
        // 1 hour at 333 with multiplier 1.5 -> 499.5, rounds away from zero
        let rules = vec![rule("PEAK_HOUR", dec!(1.5))];
        let breakdown = compute_price(&ctx(CourtType::Outdoor, wednesday(), 18, 19), dec!(333), &rules, &[], None);
        assert_eq!(breakdown.total_price, dec!(500));
    }

    #[test]
    fn rule_order_does_not_change_the_result() {
        let mut rules = standard_rules();
        let context = ctx(CourtType::Indoor, saturday(), 18, 20);

        let forward = compute_price(&context, dec!(500), &rules, &[], None);
        rules.reverse();
        let backward = compute_price(&context, dec!(500), &rules, &[], None);

        assert_eq!(forward, backward);
    }
}
