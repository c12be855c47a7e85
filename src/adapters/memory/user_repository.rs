//! In-memory user repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::UserAccount;
use crate::ports::{RoleCounts, UserFilter, UserRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, UserAccount>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &UserAccount) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) || users.values().any(|u| u.email == user.email) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("User {} already exists", user.id),
            ));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &UserAccount) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self, filter: UserFilter) -> Result<Vec<UserAccount>, DomainError> {
        let users = self.users.read().await;
        let mut matching: Vec<UserAccount> = users
            .values()
            .filter(|u| filter.role.map_or(true, |r| u.role == r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn count_by_role(&self) -> Result<RoleCounts, DomainError> {
        let mut counts = RoleCounts::default();
        for user in self.users.read().await.values() {
            counts.add(user.role, 1);
        }
        Ok(counts)
    }
}
