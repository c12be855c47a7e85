//! User repository port.
//!
//! Persists [`UserAccount`] rows. The row is authoritative for the user's
//! role and active flag; the identity provider only proves who the caller is.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{DomainError, Role, UserId};
use crate::domain::user::UserAccount;

/// Filter for admin user listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for UserFilter {
    fn default() -> Self {
        Self {
            role: None,
            limit: 50,
            offset: 0,
        }
    }
}

/// Number of accounts per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    pub admin: u64,
    pub teacher: u64,
    pub parent: u64,
}

impl RoleCounts {
    pub fn total(&self) -> u64 {
        self.admin + self.teacher + self.parent
    }

    pub fn add(&mut self, role: Role, n: u64) {
        match role {
            Role::Admin => self.admin += n,
            Role::Teacher => self.teacher += n,
            Role::Parent => self.parent += n,
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the id or email is already taken
    /// - `DatabaseError` on persistence failure
    async fn save(&self, user: &UserAccount) -> Result<(), DomainError>;

    /// Update role, active flag, name.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the account doesn't exist
    async fn update(&self, user: &UserAccount) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError>;

    /// Newest accounts first.
    async fn list(&self, filter: UserFilter) -> Result<Vec<UserAccount>, DomainError>;

    async fn count_by_role(&self) -> Result<RoleCounts, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }

    #[test]
    fn role_counts_total() {
        let mut counts = RoleCounts::default();
        counts.add(Role::Parent, 3);
        counts.add(Role::Teacher, 2);
        counts.add(Role::Admin, 1);
        assert_eq!(counts.total(), 6);
    }
}
