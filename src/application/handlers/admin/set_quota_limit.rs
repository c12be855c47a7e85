//! SetQuotaLimitHandler - admin override of a user's daily token limit.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{AuthenticatedUser, ServiceCalendar, UserId};
use crate::domain::quota::{QuotaError, QuotaSnapshot, TokenQuota};
use crate::domain::user::{check_permission, Permission};
use crate::ports::{QuotaRepository, UserRepository};

/// Upper bound for a manually set limit.
pub const MAX_MANUAL_DAILY_LIMIT: u32 = 10_000_000;

#[derive(Debug, Clone)]
pub struct SetQuotaLimitCommand {
    pub actor: AuthenticatedUser,
    pub user_id: UserId,
    /// `None` removes the limit.
    pub daily_limit: Option<u32>,
}

pub struct SetQuotaLimitHandler {
    users: Arc<dyn UserRepository>,
    quotas: Arc<dyn QuotaRepository>,
    calendar: ServiceCalendar,
}

impl SetQuotaLimitHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        quotas: Arc<dyn QuotaRepository>,
        calendar: ServiceCalendar,
    ) -> Self {
        Self {
            users,
            quotas,
            calendar,
        }
    }

    pub async fn handle(&self, cmd: SetQuotaLimitCommand) -> Result<QuotaSnapshot, QuotaError> {
        check_permission(&cmd.actor, Permission::ManageQuotas)?;

        if let Some(limit) = cmd.daily_limit {
            if limit > MAX_MANUAL_DAILY_LIMIT {
                return Err(QuotaError::validation(
                    "daily_limit",
                    format!("must be at most {}", MAX_MANUAL_DAILY_LIMIT),
                ));
            }
        }

        if self.users.find_by_id(&cmd.user_id).await?.is_none() {
            return Err(QuotaError::not_found(cmd.user_id));
        }

        let today = self.calendar.today();
        let quota = match self.quotas.set_limit(&cmd.user_id, cmd.daily_limit).await? {
            Some(quota) => quota,
            None => {
                let fresh = TokenQuota::new(cmd.user_id, cmd.daily_limit, today);
                let stored = self.quotas.insert_if_absent(&fresh).await?;
                if stored.daily_limit == cmd.daily_limit {
                    stored
                } else {
                    self.quotas
                        .set_limit(&cmd.user_id, cmd.daily_limit)
                        .await?
                        .unwrap_or(stored)
                }
            }
        };

        info!(
            user_id = %cmd.user_id,
            admin_id = %cmd.actor.id,
            limit = ?cmd.daily_limit,
            "Daily token limit changed"
        );
        Ok(quota.snapshot(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryQuotaRepository, InMemoryUserRepository};
    use crate::domain::foundation::Role;
    use crate::domain::user::UserAccount;

    async fn setup() -> (SetQuotaLimitHandler, UserAccount, AuthenticatedUser) {
        let users = InMemoryUserRepository::new();
        let account = UserAccount::register(UserId::new(), "ph@example.vn", None).unwrap();
        users.save(&account).await.unwrap();
        let handler = SetQuotaLimitHandler::new(
            Arc::new(users),
            Arc::new(InMemoryQuotaRepository::new()),
            ServiceCalendar::vietnam(),
        );
        let admin = AuthenticatedUser::new(UserId::new(), "qt@example.vn", Role::Admin, None);
        (handler, account, admin)
    }

    #[tokio::test]
    async fn sets_and_clears_limit() {
        let (handler, account, admin) = setup().await;

        let snapshot = handler
            .handle(SetQuotaLimitCommand {
                actor: admin.clone(),
                user_id: account.id,
                daily_limit: Some(5_000),
            })
            .await
            .unwrap();
        assert_eq!(snapshot.daily_limit, Some(5_000));

        let snapshot = handler
            .handle(SetQuotaLimitCommand {
                actor: admin,
                user_id: account.id,
                daily_limit: None,
            })
            .await
            .unwrap();
        assert_eq!(snapshot.remaining, None);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (handler, _, admin) = setup().await;
        let missing = UserId::new();
        let err = handler
            .handle(SetQuotaLimitCommand {
                actor: admin,
                user_id: missing,
                daily_limit: Some(1),
            })
            .await
            .unwrap_err();
        assert_eq!(err, QuotaError::not_found(missing));
    }

    #[tokio::test]
    async fn absurd_limit_is_rejected() {
        let (handler, account, admin) = setup().await;
        let err = handler
            .handle(SetQuotaLimitCommand {
                actor: admin,
                user_id: account.id,
                daily_limit: Some(MAX_MANUAL_DAILY_LIMIT + 1),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, QuotaError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn teacher_cannot_change_limits() {
        let (handler, account, _) = setup().await;
        let teacher = AuthenticatedUser::new(UserId::new(), "gv@example.vn", Role::Teacher, None);
        let err = handler
            .handle(SetQuotaLimitCommand {
                actor: teacher,
                user_id: account.id,
                daily_limit: Some(1),
            })
            .await
            .unwrap_err();
        assert_eq!(err, QuotaError::Forbidden);
    }
}
