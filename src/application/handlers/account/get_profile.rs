//! GetProfileHandler - the caller's account, permissions and plan.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, Timestamp};
use crate::domain::payment::Subscription;
use crate::domain::user::{Permission, UserAccount, UserError};
use crate::ports::{SubscriptionRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user: AuthenticatedUser,
}

#[derive(Debug, Clone)]
pub struct GetProfileResult {
    pub account: UserAccount,
    pub permissions: &'static [Permission],
    /// Only set while the subscription is unexpired.
    pub subscription: Option<Subscription>,
}

pub struct GetProfileHandler {
    users: Arc<dyn UserRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl GetProfileHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            users,
            subscriptions,
        }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<GetProfileResult, UserError> {
        let account = self
            .users
            .find_by_id(&query.user.id)
            .await?
            .ok_or(UserError::NotFound(query.user.id))?;

        let now = Timestamp::now();
        let subscription = self
            .subscriptions
            .find_by_user(&account.id)
            .await?
            .filter(|s| s.is_active(&now));

        Ok(GetProfileResult {
            permissions: account.role.permissions(),
            account,
            subscription,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemorySubscriptionRepository, InMemoryUserRepository};
    use crate::domain::foundation::UserId;
    use crate::domain::payment::Plan;

    #[tokio::test]
    async fn returns_active_subscription_and_permissions() {
        let users = InMemoryUserRepository::new();
        let subscriptions = InMemorySubscriptionRepository::new();
        let account = UserAccount::register(UserId::new(), "ph@example.vn", None).unwrap();
        users.save(&account).await.unwrap();
        subscriptions
            .upsert(&Subscription::start(account.id, Plan::Basic, Timestamp::now()))
            .await
            .unwrap();

        let handler = GetProfileHandler::new(Arc::new(users), Arc::new(subscriptions));
        let result = handler
            .handle(GetProfileQuery {
                user: account.to_authenticated(),
            })
            .await
            .unwrap();

        assert_eq!(result.account, account);
        assert!(result.permissions.contains(&Permission::UseTutorChat));
        assert_eq!(result.subscription.map(|s| s.plan), Some(Plan::Basic));
    }

    #[tokio::test]
    async fn expired_subscription_is_hidden() {
        let users = InMemoryUserRepository::new();
        let subscriptions = InMemorySubscriptionRepository::new();
        let account = UserAccount::register(UserId::new(), "ph@example.vn", None).unwrap();
        users.save(&account).await.unwrap();
        let started = Timestamp::now().add_days(-45);
        subscriptions
            .upsert(&Subscription::start(account.id, Plan::Premium, started))
            .await
            .unwrap();

        let handler = GetProfileHandler::new(Arc::new(users), Arc::new(subscriptions));
        let result = handler
            .handle(GetProfileQuery {
                user: account.to_authenticated(),
            })
            .await
            .unwrap();
        assert!(result.subscription.is_none());
    }
}
