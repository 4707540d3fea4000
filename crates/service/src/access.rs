//! Tenant access guard evaluated against the grants embedded in the token.

use uuid::Uuid;

use models::role_grant::Role;

use crate::auth::domain::Grant;
use crate::auth::errors::AuthError;

/// A principal may touch a tenant's data when they hold a grant for that
/// tenant, or a platform-wide grant. Anything else is forbidden, including
/// valid tokens scoped to other tenants.
pub fn require_tenant(grants: &[Grant], tenant_id: Uuid) -> Result<(), AuthError> {
    let allowed = grants
        .iter()
        .any(|g| g.role == Role::PlatformAdmin || g.tenant_id == Some(tenant_id));
    if allowed {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

pub fn require_platform_admin(grants: &[Grant]) -> Result<(), AuthError> {
    if grants.iter().any(|g| g.role == Role::PlatformAdmin) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

/// Tenant admins manage configuration (fee schedule, income types); staff
/// grants only cover day-to-day operations.
pub fn require_tenant_admin(grants: &[Grant], tenant_id: Uuid) -> Result<(), AuthError> {
    let allowed = grants.iter().any(|g| {
        g.role == Role::PlatformAdmin
            || (g.tenant_id == Some(tenant_id) && g.role == Role::TenantAdmin)
    });
    if allowed {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(tenant: Uuid) -> Grant {
        Grant { tenant_id: Some(tenant), role: Role::MemberStaff }
    }

    #[test]
    fn grant_for_tenant_passes() {
        let t = Uuid::new_v4();
        assert!(require_tenant(&[staff(t)], t).is_ok());
    }

    #[test]
    fn valid_token_for_other_tenant_is_forbidden() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let err = require_tenant(&[staff(a)], b).unwrap_err();
        assert!(matches!(err, AuthError::Forbidden));
    }

    #[test]
    fn platform_admin_passes_every_tenant() {
        let admin = Grant { tenant_id: None, role: Role::PlatformAdmin };
        assert!(require_tenant(&[admin], Uuid::new_v4()).is_ok());
        assert!(require_platform_admin(&[admin]).is_ok());
    }

    #[test]
    fn empty_grants_are_forbidden() {
        assert!(require_tenant(&[], Uuid::new_v4()).is_err());
        assert!(require_platform_admin(&[]).is_err());
    }

    #[test]
    fn staff_is_not_tenant_admin() {
        let t = Uuid::new_v4();
        assert!(require_tenant_admin(&[staff(t)], t).is_err());
        let admin = Grant { tenant_id: Some(t), role: Role::TenantAdmin };
        assert!(require_tenant_admin(&[admin], t).is_ok());
    }
}
