//! Shared helpers for tests: entity factories and a test server.
//!
//! Factories insert rows through the same repositories production code
//! uses, with unique names/emails so tests can share a database.

use crate::api::models::courts::CourtType;
use crate::api::models::users::Role;
use crate::auth::{password, token};
use crate::config::Config;
use crate::db::handlers::{Coaches, Courts, Equipment, PricingRules, Users};
use crate::db::models::coaches::{CoachAvailabilityCreateDBRequest, CoachAvailabilityDBResponse, CoachCreateDBRequest, CoachDBResponse};
use crate::db::models::courts::{CourtCreateDBRequest, CourtDBResponse};
use crate::db::models::equipment::{EquipmentCreateDBRequest, EquipmentDBResponse};
use crate::db::models::pricing_rules::{PricingRuleCreateDBRequest, PricingRuleDBResponse};
use crate::db::models::users::{UserCreateDBRequest, UserDBResponse};
use crate::types::CoachId;
use crate::{AppState, build_router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::PgPool;
use uuid::Uuid;

/// A Saturday, so the WEEKEND rule applies in pricing scenarios.
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 4).unwrap()
}

/// A Wednesday, outside the weekend.
pub fn test_weekday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()
}

/// Config used by the test server and by token helpers; they must agree
/// on the signing secret.
pub fn test_config() -> Config {
    Config {
        secret_key: "test-secret".to_string(),
        ..Config::default()
    }
}

/// Build a test server over a migrated pool.
pub fn create_test_app(pool: PgPool) -> axum_test::TestServer {
    let state = AppState::builder().db(pool).config(test_config()).build();
    let router = build_router(&state).expect("Failed to build router");
    axum_test::TestServer::new(router).expect("Failed to create test server")
}

/// A bearer token for the given user, signed with the test secret.
pub fn bearer_for(user: &UserDBResponse) -> String {
    let token = token::issue_token(user, &test_config()).expect("Failed to issue token");
    format!("Bearer {token}")
}

pub async fn create_test_user(pool: &PgPool, role: Role) -> UserDBResponse {
    let mut conn = pool.acquire().await.unwrap();
    Users::new(&mut conn)
        .create(&UserCreateDBRequest {
            name: "Test User".to_string(),
            email: format!("user-{}@example.com", Uuid::new_v4()),
            password_hash: password::hash_string("user-password").unwrap(),
            role,
        })
        .await
        .unwrap()
}

pub async fn create_test_court(pool: &PgPool, court_type: CourtType, base_price: Decimal) -> CourtDBResponse {
    let mut conn = pool.acquire().await.unwrap();
    Courts::new(&mut conn)
        .create(&CourtCreateDBRequest {
            name: format!("Court {}", Uuid::new_v4()),
            court_type,
            base_price,
        })
        .await
        .unwrap()
}

pub async fn create_test_equipment(pool: &PgPool, name: &str, total_quantity: i32, price_per_hour: Decimal) -> EquipmentDBResponse {
    let mut conn = pool.acquire().await.unwrap();
    Equipment::new(&mut conn)
        .create(&EquipmentCreateDBRequest {
            name: name.to_string(),
            total_quantity,
            price_per_hour,
        })
        .await
        .unwrap()
}

pub async fn create_test_coach(pool: &PgPool, price_per_hour: Decimal) -> CoachDBResponse {
    let mut conn = pool.acquire().await.unwrap();
    Coaches::new(&mut conn)
        .create(&CoachCreateDBRequest {
            name: format!("Coach {}", Uuid::new_v4()),
            price_per_hour,
        })
        .await
        .unwrap()
}

pub async fn add_test_availability(
    pool: &PgPool,
    coach_id: CoachId,
    date: NaiveDate,
    start_time: i32,
    end_time: i32,
) -> CoachAvailabilityDBResponse {
    let mut conn = pool.acquire().await.unwrap();
    Coaches::new(&mut conn)
        .add_availability(&CoachAvailabilityCreateDBRequest {
            coach_id,
            date,
            start_time,
            end_time,
        })
        .await
        .unwrap()
}

pub async fn create_test_rule(pool: &PgPool, rule_type: &str, multiplier: Decimal) -> PricingRuleDBResponse {
    let mut conn = pool.acquire().await.unwrap();
    PricingRules::new(&mut conn)
        .create(&PricingRuleCreateDBRequest {
            name: format!("{rule_type} rule"),
            rule_type: rule_type.to_string(),
            multiplier,
        })
        .await
        .unwrap()
}

/// The reference rule set: PEAK_HOUR x1.5, WEEKEND x1.2, INDOOR x1.3.
pub async fn seed_standard_rules(pool: &PgPool) {
    create_test_rule(pool, "PEAK_HOUR", dec!(1.5)).await;
    create_test_rule(pool, "WEEKEND", dec!(1.2)).await;
    create_test_rule(pool, "INDOOR", dec!(1.3)).await;
}
