//! ChangeUserRoleHandler - admin assigns a role.
//!
//! Users without an active paid plan get the new role's default daily
//! limit. A paid plan's limit is left in place.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{AuthenticatedUser, Role, ServiceCalendar, Timestamp, UserId};
use crate::domain::quota::{QuotaPolicy, TokenQuota};
use crate::domain::user::{check_permission, Permission, UserAccount, UserError};
use crate::ports::{QuotaRepository, SubscriptionRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct ChangeUserRoleCommand {
    pub actor: AuthenticatedUser,
    pub user_id: UserId,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct ChangeUserRoleResult {
    pub account: UserAccount,
    pub changed: bool,
}

pub struct ChangeUserRoleHandler {
    users: Arc<dyn UserRepository>,
    quotas: Arc<dyn QuotaRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    policy: QuotaPolicy,
    calendar: ServiceCalendar,
}

impl ChangeUserRoleHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        quotas: Arc<dyn QuotaRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        policy: QuotaPolicy,
        calendar: ServiceCalendar,
    ) -> Self {
        Self {
            users,
            quotas,
            subscriptions,
            policy,
            calendar,
        }
    }

    pub async fn handle(
        &self,
        cmd: ChangeUserRoleCommand,
    ) -> Result<ChangeUserRoleResult, UserError> {
        check_permission(&cmd.actor, Permission::ManageUsers)?;

        let mut account = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or(UserError::not_found(cmd.user_id))?;
        let previous = account.role;

        if !account.change_role(cmd.role, &cmd.actor.id)? {
            return Ok(ChangeUserRoleResult {
                account,
                changed: false,
            });
        }
        self.users.update(&account).await?;

        let now = Timestamp::now();
        let has_plan = self
            .subscriptions
            .find_by_user(&account.id)
            .await?
            .map_or(false, |s| s.is_active(&now));
        if !has_plan {
            let limit = self.policy.limit_for(account.role);
            if self.quotas.set_limit(&account.id, limit).await?.is_none() {
                let fresh = TokenQuota::new(account.id, limit, self.calendar.today());
                if self.quotas.insert_if_absent(&fresh).await?.daily_limit != limit {
                    self.quotas.set_limit(&account.id, limit).await?;
                }
            }
        }

        info!(
            user_id = %account.id,
            admin_id = %cmd.actor.id,
            from = %previous,
            to = %account.role,
            "User role changed"
        );

        Ok(ChangeUserRoleResult {
            account,
            changed: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryQuotaRepository, InMemorySubscriptionRepository, InMemoryUserRepository,
    };
    use crate::domain::payment::{Plan, Subscription};

    struct Fixture {
        users: InMemoryUserRepository,
        quotas: InMemoryQuotaRepository,
        subscriptions: InMemorySubscriptionRepository,
        handler: ChangeUserRoleHandler,
    }

    fn fixture() -> Fixture {
        let users = InMemoryUserRepository::new();
        let quotas = InMemoryQuotaRepository::new();
        let subscriptions = InMemorySubscriptionRepository::new();
        let handler = ChangeUserRoleHandler::new(
            Arc::new(users.clone()),
            Arc::new(quotas.clone()),
            Arc::new(subscriptions.clone()),
            QuotaPolicy::default(),
            ServiceCalendar::vietnam(),
        );
        Fixture {
            users,
            quotas,
            subscriptions,
            handler,
        }
    }

    async fn seed(f: &Fixture, role: Role) -> UserAccount {
        let mut account =
            UserAccount::register(UserId::new(), format!("{}@example.vn", UserId::new()), None)
                .unwrap();
        account.role = role;
        f.users.save(&account).await.unwrap();
        f.quotas
            .save(&QuotaPolicy::default().quota_for(account.id, role, ServiceCalendar::vietnam().today()))
            .await
            .unwrap();
        account
    }

    #[tokio::test]
    async fn promotes_parent_to_teacher_with_teacher_limit() {
        let f = fixture();
        let admin = seed(&f, Role::Admin).await;
        let parent = seed(&f, Role::Parent).await;

        let result = f
            .handler
            .handle(ChangeUserRoleCommand {
                actor: admin.to_authenticated(),
                user_id: parent.id,
                role: Role::Teacher,
            })
            .await
            .unwrap();

        assert!(result.changed);
        let stored = f.users.find_by_id(&parent.id).await.unwrap().unwrap();
        assert_eq!(stored.role, Role::Teacher);
        let quota = f.quotas.find(&parent.id).await.unwrap().unwrap();
        assert_eq!(quota.daily_limit, Some(50_000));
    }

    #[tokio::test]
    async fn paid_plan_limit_survives_role_change() {
        let f = fixture();
        let admin = seed(&f, Role::Admin).await;
        let parent = seed(&f, Role::Parent).await;
        f.quotas.set_limit(&parent.id, Some(300_000)).await.unwrap();
        f.subscriptions
            .upsert(&Subscription::start(parent.id, Plan::Premium, Timestamp::now()))
            .await
            .unwrap();

        f.handler
            .handle(ChangeUserRoleCommand {
                actor: admin.to_authenticated(),
                user_id: parent.id,
                role: Role::Teacher,
            })
            .await
            .unwrap();

        let quota = f.quotas.find(&parent.id).await.unwrap().unwrap();
        assert_eq!(quota.daily_limit, Some(300_000));
    }

    #[tokio::test]
    async fn admin_cannot_demote_themself() {
        let f = fixture();
        let admin = seed(&f, Role::Admin).await;

        let err = f
            .handler
            .handle(ChangeUserRoleCommand {
                actor: admin.to_authenticated(),
                user_id: admin.id,
                role: Role::Parent,
            })
            .await
            .unwrap_err();

        assert_eq!(err, UserError::cannot_modify_self("demote"));
    }

    #[tokio::test]
    async fn same_role_is_a_no_op() {
        let f = fixture();
        let admin = seed(&f, Role::Admin).await;
        let teacher = seed(&f, Role::Teacher).await;

        let result = f
            .handler
            .handle(ChangeUserRoleCommand {
                actor: admin.to_authenticated(),
                user_id: teacher.id,
                role: Role::Teacher,
            })
            .await
            .unwrap();
        assert!(!result.changed);
    }
}
