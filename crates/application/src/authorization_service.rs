use std::sync::Arc;

use nestling_core::{AppError, AppResult, UserIdentity};
use nestling_domain::{Action, PermissionTable, Resource, RolePermissions};

/// Message carried by every permission denial.
pub const FORBIDDEN_MESSAGE: &str = "Forbidden: Insufficient permissions";

/// Application service for role-based authorization checks.
///
/// Decisions are pure lookups in an immutable [`PermissionTable`]; the role
/// name comes from the verified token, never from the store.
#[derive(Clone)]
pub struct AuthorizationService {
    table: Arc<PermissionTable>,
}

impl AuthorizationService {
    /// Creates a new authorization service over a fixed permission table.
    #[must_use]
    pub fn new(table: Arc<PermissionTable>) -> Self {
        Self { table }
    }

    /// Requires that the identity's role grants `action` on `resource`.
    pub fn require_permission(
        &self,
        identity: &UserIdentity,
        resource: Resource,
        action: Action,
    ) -> AppResult<()> {
        if self.table.allows(identity.role_name(), resource, action) {
            return Ok(());
        }

        Err(AppError::Forbidden(FORBIDDEN_MESSAGE.to_owned()))
    }

    /// Returns whether the role may perform the action. Unknown role,
    /// resource or action names are denied.
    #[must_use]
    pub fn can_perform(&self, role_name: &str, resource: &str, action: &str) -> bool {
        self.table.can_perform(role_name, resource, action)
    }

    /// Returns every grant of the role, or an empty set for unknown roles.
    #[must_use]
    pub fn permissions_for(&self, role_name: &str) -> &RolePermissions {
        self.table.permissions_for(role_name)
    }
}
