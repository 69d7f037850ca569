//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection or transaction, provides
//! strongly-typed operations, and returns domain models from
//! [`crate::db::models`]. Queries use the runtime API
//! (`sqlx::query_as::<_, T>`) with explicit binds.
//!
//! # Available Repositories
//!
//! - [`Users`]: user accounts
//! - [`Courts`]: court catalog
//! - [`Equipment`]: equipment catalog and capacity
//! - [`Coaches`]: coach catalog and availability windows
//! - [`PricingRules`]: live pricing configuration
//! - [`Bookings`]: booking records, conflict lookups and the atomic insert

pub mod bookings;
pub mod coaches;
pub mod courts;
pub mod equipment;
pub mod pricing_rules;
pub mod users;

pub use bookings::Bookings;
pub use coaches::Coaches;
pub use courts::Courts;
pub use equipment::Equipment;
pub use pricing_rules::PricingRules;
pub use users::Users;
