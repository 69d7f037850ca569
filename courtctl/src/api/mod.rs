//! HTTP API layer.
//!
//! The API is split between:
//!
//! - **Public reads**: active courts, equipment, active coaches, and coach
//!   availability for a date — no authentication required.
//! - **Authenticated surface**: creating bookings and reading one's own
//!   booking history.
//! - **Admin surface**: catalog management, pricing rules, full listings.
//!
//! Handlers live in [`handlers`], request/response DTOs in [`models`].

pub mod handlers;
pub mod models;
