//! Role and ownership rules shared by the directory services.

use models::business;
use models::user::Role;
use uuid::Uuid;

use crate::auth::domain::AuthUser;
use crate::errors::ServiceError;

/// Caller's role must be one of `roles`.
pub fn require_role(caller: &AuthUser, roles: &[Role]) -> Result<(), ServiceError> {
    if roles.contains(&caller.role) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!(
            "User role {} is not authorized to access this route",
            caller.role.as_str()
        )))
    }
}

/// Owner of the resource, or an admin.
pub fn can_manage(caller: &AuthUser, owner_id: Uuid) -> bool {
    caller.role == Role::Admin || caller.id == owner_id
}

pub fn ensure_can_manage(caller: &AuthUser, owner_id: Uuid, what: &str) -> Result<(), ServiceError> {
    if can_manage(caller, owner_id) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!("Not authorized to {what}")))
    }
}

/// Approved businesses are public; pending ones only to their owner and admins.
pub fn can_view_business(caller: Option<&AuthUser>, business: &business::Model) -> bool {
    business.approved || caller.is_some_and(|c| can_manage(c, business.owner_id))
}

/// Whether list operations include unapproved businesses.
pub fn sees_unapproved(caller: Option<&AuthUser>) -> bool {
    caller.is_some_and(|c| c.role == Role::Admin)
}
