//! # courtctl: Court Booking Control Layer
//!
//! `courtctl` is the backend for a racquet-sports facility: it reserves
//! shared physical resources (courts, equipment, coaches) for fixed time
//! windows and prices each reservation through a set of composable,
//! admin-editable rules.
//!
//! ## Overview
//!
//! The heart of the system is the booking transaction engine in
//! [`booking`]. Given a requested time slot and a set of desired
//! resources, it verifies that every resource is free for that slot,
//! computes a price, and commits the reservation atomically: no two
//! confirmed bookings ever double-allocate the same court-hour. Everything
//! else — authentication, catalog CRUD, seeding — is conventional
//! surface around that core.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum)
//! for the HTTP layer and uses PostgreSQL for all persistence.
//!
//! The **API layer** ([`api`]) exposes public catalog reads (active
//! courts, equipment, active coaches, per-date coach availability), an
//! authenticated booking surface, and an admin surface for catalog and
//! pricing-rule management.
//!
//! The **authentication layer** ([`auth`]) issues JWT bearer tokens on
//! registration/login and re-validates the user row on every request.
//! Authorization is role-based (`USER` / `ADMIN`).
//!
//! The **database layer** ([`db`]) uses the repository pattern over SQLx.
//! Repositories wrap a `&mut PgConnection` so the booking orchestrator can
//! compose them inside a single transaction.
//!
//! The **core** is split into three parts mirroring its responsibilities:
//! [`availability`] (pure per-resource-kind predicates), [`pricing`] (the
//! rule-composition engine) and [`booking`] (the transactional
//! orchestrator). Concurrent create-booking calls are serialized by
//! PostgreSQL: the orchestrator runs its check-then-insert sequence under
//! `SERIALIZABLE` isolation, so a racing pair of overlapping requests
//! cannot both commit.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use courtctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = courtctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     courtctl::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod availability;
pub mod booking;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod pricing;
pub mod telemetry;
mod types;

#[cfg(test)]
pub mod test_utils;

use crate::{
    api::models::users::Role,
    auth::password,
    db::handlers::{Coaches, Courts, Equipment, PricingRules, Users},
    db::models::{
        coaches::{CoachAvailabilityCreateDBRequest, CoachCreateDBRequest},
        courts::CourtCreateDBRequest,
        equipment::EquipmentCreateDBRequest,
        pricing_rules::PricingRuleCreateDBRequest,
        users::UserCreateDBRequest,
    },
    openapi::ApiDoc,
};
use crate::api::models::courts::CourtType;
use axum::http::HeaderValue;
use axum::{
    Router, http,
    routing::{get, patch, post},
};
use bon::Builder;
pub use config::Config;
use config::CorsOrigin;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{BookingId, CoachId, CourtId, EquipmentId, Operation, Permission, PricingRuleId, Resource, UserId};

/// Application state shared across all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the courtctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the initial admin user if it doesn't exist.
///
/// Idempotent: creates the admin on first startup, or updates the password
/// if the user already exists and a password is configured.
#[instrument(skip_all)]
pub async fn create_initial_admin_user(email: &str, admin_password: Option<&str>, db: &PgPool) -> Result<UserId, anyhow::Error> {
    let password_hash = match admin_password {
        Some(pwd) => password::hash_string(pwd).map_err(|e| anyhow::anyhow!("Failed to hash admin password: {e}"))?,
        // No configured password: an unguessable placeholder that argon2
        // verification can never match, so the account exists but cannot
        // log in until a password is set.
        None => password::hash_string(&uuid::Uuid::new_v4().to_string())
            .map_err(|e| anyhow::anyhow!("Failed to hash admin placeholder: {e}"))?,
    };

    let mut tx = db.begin().await?;
    let mut user_repo = Users::new(&mut tx);

    if let Some(existing_user) = user_repo.get_by_email(email).await? {
        if admin_password.is_some() {
            sqlx::query("UPDATE users SET password_hash = $1 WHERE email = $2")
                .bind(&password_hash)
                .bind(email)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        return Ok(existing_user.id);
    }

    let created_user = Users::new(&mut tx)
        .create(&UserCreateDBRequest {
            name: "Admin".to_string(),
            email: email.to_string(),
            password_hash,
            role: Role::Admin,
        })
        .await?;

    tx.commit().await?;
    Ok(created_user.id)
}

/// Seed the database with the reference catalog (run only once).
///
/// Installs four courts, two equipment types, three coaches with two weeks
/// of availability, and the three standard pricing rules. Idempotent: the
/// `catalog_seeded` flag in `system_config` prevents re-seeding, so manual
/// catalog changes survive restarts.
#[instrument(skip_all)]
pub async fn seed_database(db: &PgPool) -> Result<(), anyhow::Error> {
    let mut tx = db.begin().await?;

    let seeded: Option<bool> = sqlx::query_scalar("SELECT value FROM system_config WHERE key = 'catalog_seeded'")
        .fetch_optional(&mut *tx)
        .await?;

    if let Some(true) = seeded {
        info!("Database already seeded, skipping seeding operations");
        tx.commit().await?;
        return Ok(());
    }

    info!("Seeding database with the initial catalog");

    for (name, court_type, base_price) in [
        ("Court 1", CourtType::Indoor, Decimal::from(500)),
        ("Court 2", CourtType::Indoor, Decimal::from(500)),
        ("Court 3", CourtType::Outdoor, Decimal::from(300)),
        ("Court 4", CourtType::Outdoor, Decimal::from(300)),
    ] {
        Courts::new(&mut tx)
            .create(&CourtCreateDBRequest {
                name: name.to_string(),
                court_type,
                base_price,
            })
            .await?;
    }

    for (name, total_quantity, price_per_hour) in [("Racket", 10, Decimal::from(50)), ("Shoes", 5, Decimal::from(30))] {
        Equipment::new(&mut tx)
            .create(&EquipmentCreateDBRequest {
                name: name.to_string(),
                total_quantity,
                price_per_hour,
            })
            .await?;
    }

    // Each coach gets two weeks of availability from today in their
    // personal working hours.
    let today = chrono::Utc::now().date_naive();
    for (name, price_per_hour, start_time, end_time) in [
        ("Coach A", Decimal::from(200), 6, 22),
        ("Coach B", Decimal::from(250), 8, 20),
        ("Coach C", Decimal::from(300), 10, 18),
    ] {
        let coach = Coaches::new(&mut tx)
            .create(&CoachCreateDBRequest {
                name: name.to_string(),
                price_per_hour,
            })
            .await?;

        for day in 0..14 {
            Coaches::new(&mut tx)
                .add_availability(&CoachAvailabilityCreateDBRequest {
                    coach_id: coach.id,
                    date: today + chrono::Duration::days(day),
                    start_time,
                    end_time,
                })
                .await?;
        }
    }

    for (name, rule_type, multiplier) in [
        ("Peak Hours (6-9 PM)", "PEAK_HOUR", Decimal::new(15, 1)),
        ("Weekend Pricing", "WEEKEND", Decimal::new(12, 1)),
        ("Indoor Court Premium", "INDOOR", Decimal::new(13, 1)),
    ] {
        PricingRules::new(&mut tx)
            .create(&PricingRuleCreateDBRequest {
                name: name.to_string(),
                rule_type: rule_type.to_string(),
                multiplier,
            })
            .await?;
    }

    sqlx::query("UPDATE system_config SET value = TRUE, updated_at = NOW() WHERE key = 'catalog_seeded'")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    debug!("Database seeded successfully");

    Ok(())
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>()?,
            CorsOrigin::Url(url) => url.as_str().parse::<HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.cors.allow_credentials)
        .allow_headers([http::header::AUTHORIZATION, http::header::CONTENT_TYPE])
        .expose_headers(vec![http::header::LOCATION]);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the main application router with all endpoints and middleware.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    // Authentication routes at root level
    let auth_routes = Router::new()
        .route("/authentication/register", post(api::handlers::auth::register))
        .route("/authentication/login", post(api::handlers::auth::login))
        .with_state(state.clone());

    // API routes
    let api_routes = Router::new()
        // Court catalog (public read, admin write)
        .route("/courts", get(api::handlers::courts::list_courts))
        .route("/courts", post(api::handlers::courts::create_court))
        .route("/courts/all", get(api::handlers::courts::list_all_courts))
        .route("/courts/{id}/toggle", patch(api::handlers::courts::toggle_court))
        // Equipment catalog
        .route("/equipment", get(api::handlers::equipment::list_equipment))
        .route("/equipment/{id}", patch(api::handlers::equipment::update_equipment))
        // Coaches and availability
        .route("/coaches", get(api::handlers::coaches::list_coaches))
        .route("/coaches", post(api::handlers::coaches::create_coach))
        .route("/coaches/all", get(api::handlers::coaches::list_all_coaches))
        .route("/coaches/{id}", patch(api::handlers::coaches::update_coach))
        .route("/coaches/{id}/toggle", patch(api::handlers::coaches::toggle_coach))
        .route("/coaches/{id}/availability", post(api::handlers::coaches::add_availability))
        .route("/coaches/{id}/availability", get(api::handlers::coaches::list_availability))
        .route("/coaches/{id}/availability/all", get(api::handlers::coaches::list_all_availability))
        // Pricing rules (admin only)
        .route("/pricing-rules", get(api::handlers::pricing_rules::list_pricing_rules))
        .route("/pricing-rules", post(api::handlers::pricing_rules::create_pricing_rule))
        .route("/pricing-rules/{id}", patch(api::handlers::pricing_rules::update_pricing_rule))
        // Bookings
        .route("/bookings", post(api::handlers::bookings::create_booking))
        .route("/bookings", get(api::handlers::bookings::list_own_bookings))
        .route("/bookings/all", get(api::handlers::bookings::list_all_bookings))
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(auth_routes)
        .nest("/api/v1", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Create CORS layer from config
    let cors_layer = create_cors_layer(&state.config)?;
    let router = router.layer(cors_layer);

    // Add tracing layer
    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] connects to PostgreSQL, runs
///    migrations, ensures the admin user, and seeds the catalog once.
/// 2. **Serve**: [`Application::serve`] binds the TCP port and handles
///    requests until the shutdown future resolves.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting control layer with configuration: {:#?}", config);

        let pool = PgPool::connect(&config.database_url).await?;
        migrator().run(&pool).await?;

        create_initial_admin_user(&config.admin_email, config.admin_password.as_deref(), &pool).await?;
        seed_database(&pool).await?;

        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(&state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Control layer listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        // Close database connections
        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

pub use errors::Error;

#[cfg(test)]
mod test {
    use crate::api::models::bookings::{BookingOutcomeResponse, BookingResponse};
    use crate::api::models::courts::{CourtResponse, CourtType};
    use crate::api::models::users::Role;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn register_login_and_book_over_http(pool: PgPool) {
        let server = create_test_app(pool.clone());
        let court = create_test_court(&pool, CourtType::Indoor, dec!(500)).await;
        seed_standard_rules(&pool).await;

        let registration = server
            .post("/authentication/register")
            .json(&json!({
                "name": "Casey",
                "email": "casey@example.com",
                "password": "a-long-password"
            }))
            .await;
        assert_eq!(registration.status_code().as_u16(), 201);

        let login = server
            .post("/authentication/login")
            .json(&json!({
                "email": "casey@example.com",
                "password": "a-long-password"
            }))
            .await;
        assert_eq!(login.status_code().as_u16(), 200);
        let token = login.json::<serde_json::Value>()["token"].as_str().unwrap().to_string();

        // Saturday evening on an indoor court: all three rules apply
        let created = server
            .post("/api/v1/bookings")
            .add_header("authorization", format!("Bearer {token}"))
            .json(&json!({
                "courtId": court.id,
                "date": "2025-01-04",
                "startTime": 18,
                "endTime": 20,
                "equipment": []
            }))
            .await;
        assert_eq!(created.status_code().as_u16(), 201);
        let outcome = created.json::<BookingOutcomeResponse>();
        assert_eq!(outcome.pricing.multiplier, dec!(2.34));
        assert_eq!(outcome.pricing.total_price, dec!(2340));
        assert_eq!(outcome.booking.court.id, court.id);

        // An overlapping request is rejected with a conflict
        let conflicting = server
            .post("/api/v1/bookings")
            .add_header("authorization", format!("Bearer {token}"))
            .json(&json!({
                "courtId": court.id,
                "date": "2025-01-04",
                "startTime": 19,
                "endTime": 21,
                "equipment": []
            }))
            .await;
        assert_eq!(conflicting.status_code().as_u16(), 409);

        // The booking shows up in the user's history
        let history = server
            .get("/api/v1/bookings")
            .add_header("authorization", format!("Bearer {token}"))
            .await;
        assert_eq!(history.status_code().as_u16(), 200);
        let bookings = history.json::<Vec<BookingResponse>>();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].id, outcome.booking.id);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn booking_requires_authentication(pool: PgPool) {
        let server = create_test_app(pool.clone());
        let court = create_test_court(&pool, CourtType::Indoor, dec!(500)).await;

        let response = server
            .post("/api/v1/bookings")
            .json(&json!({
                "courtId": court.id,
                "date": "2025-01-04",
                "startTime": 10,
                "endTime": 12
            }))
            .await;
        assert_eq!(response.status_code().as_u16(), 401);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn catalog_writes_are_admin_only(pool: PgPool) {
        let server = create_test_app(pool.clone());
        let user = create_test_user(&pool, Role::User).await;
        let admin = create_test_user(&pool, Role::Admin).await;

        let payload = json!({
            "name": "Court 9",
            "courtType": "INDOOR",
            "basePrice": 500
        });

        let denied = server
            .post("/api/v1/courts")
            .add_header("authorization", bearer_for(&user))
            .json(&payload)
            .await;
        assert_eq!(denied.status_code().as_u16(), 403);

        let allowed = server
            .post("/api/v1/courts")
            .add_header("authorization", bearer_for(&admin))
            .json(&payload)
            .await;
        assert_eq!(allowed.status_code().as_u16(), 201);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn public_court_list_hides_disabled_courts(pool: PgPool) {
        let server = create_test_app(pool.clone());
        let admin = create_test_user(&pool, Role::Admin).await;
        let active = create_test_court(&pool, CourtType::Indoor, dec!(500)).await;
        let disabled = create_test_court(&pool, CourtType::Outdoor, dec!(300)).await;

        let toggled = server
            .patch(&format!("/api/v1/courts/{}/toggle", disabled.id))
            .add_header("authorization", bearer_for(&admin))
            .await;
        assert_eq!(toggled.status_code().as_u16(), 200);

        let public = server.get("/api/v1/courts").await;
        assert_eq!(public.status_code().as_u16(), 200);
        let courts = public.json::<Vec<CourtResponse>>();
        assert_eq!(courts.len(), 1);
        assert_eq!(courts[0].id, active.id);

        let admin_view = server
            .get("/api/v1/courts/all")
            .add_header("authorization", bearer_for(&admin))
            .await;
        assert_eq!(admin_view.json::<Vec<CourtResponse>>().len(), 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn all_bookings_view_is_admin_only(pool: PgPool) {
        let server = create_test_app(pool.clone());
        let user = create_test_user(&pool, Role::User).await;
        let admin = create_test_user(&pool, Role::Admin).await;

        let denied = server
            .get("/api/v1/bookings/all")
            .add_header("authorization", bearer_for(&user))
            .await;
        assert_eq!(denied.status_code().as_u16(), 403);

        let allowed = server
            .get("/api/v1/bookings/all")
            .add_header("authorization", bearer_for(&admin))
            .await;
        assert_eq!(allowed.status_code().as_u16(), 200);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn seeding_runs_once(pool: PgPool) {
        super::seed_database(&pool).await.expect("First seeding should succeed");

        let court_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courts").fetch_one(&pool).await.unwrap();
        assert_eq!(court_count, 4);
        let rule_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pricing_rules")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rule_count, 3);

        // A second run is a no-op
        super::seed_database(&pool).await.expect("Second seeding should succeed");
        let court_count_after: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courts").fetch_one(&pool).await.unwrap();
        assert_eq!(court_count_after, 4);
    }
}
