//! Common type definitions and permission system types.
//!
//! All entity IDs are UUIDs wrapped in type aliases:
//!
//! - [`UserId`]: user account identifier
//! - [`CourtId`]: court identifier
//! - [`EquipmentId`]: equipment type identifier
//! - [`CoachId`]: coach identifier
//! - [`BookingId`]: booking identifier
//! - [`PricingRuleId`]: pricing rule identifier
//!
//! The permission system is based on three types:
//!
//! - [`Resource`]: what entity type is being accessed
//! - [`Operation`]: what action is being performed
//! - [`Permission`]: authorization requirement combining resource and operation
//!
//! Operations come in two flavors: **All** (unrestricted, e.g. `ReadAll`)
//! and **Own** (restricted to the user's own entities, e.g. `ReadOwn`).

use std::fmt;
use uuid::Uuid;

// Type aliases for IDs
pub type UserId = Uuid;
pub type CourtId = Uuid;
pub type EquipmentId = Uuid;
pub type CoachId = Uuid;
pub type BookingId = Uuid;
pub type PricingRuleId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

// Operations that can be performed on resources
// *-All means unrestricted access, *-Own means restricted to own resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateAll,
    CreateOwn,
    ReadAll,
    ReadOwn,
    UpdateAll,
    // System
    SystemAccess, // Access to system-level data (like disabled catalog entries)
}

// Resources that can be operated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Courts,
    Equipment,
    Coaches,
    PricingRules,
    Bookings,
}

// Permission types for authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permission {
    /// Simple permission: (Resource, Operation)
    Allow(Resource, Operation),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::CreateAll | Operation::CreateOwn => write!(f, "Create"),
            Operation::ReadAll | Operation::ReadOwn => write!(f, "Read"),
            Operation::UpdateAll => write!(f, "Update"),
            Operation::SystemAccess => write!(f, "Access"),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Users => write!(f, "users"),
            Resource::Courts => write!(f, "courts"),
            Resource::Equipment => write!(f, "equipment"),
            Resource::Coaches => write!(f, "coaches"),
            Resource::PricingRules => write!(f, "pricing rules"),
            Resource::Bookings => write!(f, "bookings"),
        }
    }
}
