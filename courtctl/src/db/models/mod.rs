//! Database record structures matching table schemas.
//!
//! `*DBResponse` types derive [`sqlx::FromRow`] and map one-to-one onto
//! rows; `*CreateDBRequest` / `*UpdateDBRequest` types carry validated
//! values into the repositories.

pub mod bookings;
pub mod coaches;
pub mod courts;
pub mod equipment;
pub mod pricing_rules;
pub mod users;
