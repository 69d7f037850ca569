//! Role-based permission checks.

use crate::api::models::users::CurrentUser;
use crate::errors::{Error, Result};
use crate::types::{Operation, Permission, Resource};

/// Whether the user's role grants (resource, operation).
///
/// Admins hold every permission. Regular users can read the catalog and
/// create/read their own bookings; everything else is denied.
pub fn has_permission(user: &CurrentUser, resource: Resource, operation: Operation) -> bool {
    if user.is_admin() {
        return true;
    }

    match (resource, operation) {
        (Resource::Courts | Resource::Equipment | Resource::Coaches, Operation::ReadAll) => true,
        (Resource::Bookings, Operation::CreateOwn | Operation::ReadOwn) => true,
        _ => false,
    }
}

/// Enforce (resource, operation), mapping a denial to the standard
/// insufficient-permissions error.
pub fn require(user: &CurrentUser, resource: Resource, operation: Operation) -> Result<()> {
    if has_permission(user, resource, operation) {
        Ok(())
    } else {
        Err(Error::InsufficientPermissions {
            required: Permission::Allow(resource, operation),
            action: operation,
            resource: resource.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::users::Role;
    use uuid::Uuid;

    fn user_with_role(role: Role) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            name: "Someone".to_string(),
            email: "someone@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn admin_holds_every_permission() {
        let admin = user_with_role(Role::Admin);
        assert!(has_permission(&admin, Resource::Courts, Operation::CreateAll));
        assert!(has_permission(&admin, Resource::Bookings, Operation::ReadAll));
        assert!(has_permission(&admin, Resource::PricingRules, Operation::UpdateAll));
    }

    #[test]
    fn regular_users_are_limited_to_their_own_bookings() {
        let user = user_with_role(Role::User);
        assert!(has_permission(&user, Resource::Bookings, Operation::CreateOwn));
        assert!(has_permission(&user, Resource::Bookings, Operation::ReadOwn));
        assert!(has_permission(&user, Resource::Courts, Operation::ReadAll));

        assert!(!has_permission(&user, Resource::Bookings, Operation::ReadAll));
        assert!(!has_permission(&user, Resource::Courts, Operation::CreateAll));
        assert!(!has_permission(&user, Resource::PricingRules, Operation::ReadAll));

        assert!(require(&user, Resource::PricingRules, Operation::UpdateAll).is_err());
    }
}
