//! Role-based permissions.
//!
//! The mapping is fixed in code. Roles are assigned by admins, permissions
//! are never granted individually.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Role};

/// Something a caller may be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    UseTutorChat,
    GenerateContent,
    ViewOwnPayments,
    SubmitPayment,
    ManageUsers,
    ReviewPayments,
    ManageQuotas,
    ViewAdminStats,
}

impl Permission {
    pub const ALL: [Permission; 8] = [
        Permission::UseTutorChat,
        Permission::GenerateContent,
        Permission::ViewOwnPayments,
        Permission::SubmitPayment,
        Permission::ManageUsers,
        Permission::ReviewPayments,
        Permission::ManageQuotas,
        Permission::ViewAdminStats,
    ];
}

const PARENT_PERMISSIONS: &[Permission] = &[
    Permission::UseTutorChat,
    Permission::ViewOwnPayments,
    Permission::SubmitPayment,
];

static ROLE_PERMISSIONS: Lazy<HashMap<Role, Vec<Permission>>> = Lazy::new(|| {
    let parent = PARENT_PERMISSIONS.to_vec();

    let mut teacher = parent.clone();
    teacher.push(Permission::GenerateContent);

    let admin = Permission::ALL.to_vec();

    HashMap::from([
        (Role::Parent, parent),
        (Role::Teacher, teacher),
        (Role::Admin, admin),
    ])
});

/// Permissions granted to a role.
pub fn permissions_for(role: Role) -> &'static [Permission] {
    ROLE_PERMISSIONS
        .get(&role)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Returns true if the role carries the permission.
pub fn has_permission(role: Role, permission: Permission) -> bool {
    permissions_for(role).contains(&permission)
}

impl Role {
    pub fn permissions(&self) -> &'static [Permission] {
        permissions_for(*self)
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        has_permission(*self, permission)
    }
}

/// Fails with `InsufficientPermissions` unless the user's role allows it.
pub fn check_permission(user: &AuthenticatedUser, permission: Permission) -> Result<(), AuthError> {
    if user.role.has_permission(permission) {
        Ok(())
    } else {
        Err(AuthError::InsufficientPermissions)
    }
}
