//! ResetQuotaHandler - clears a user's usage for the current day.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{AuthenticatedUser, ServiceCalendar, UserId};
use crate::domain::quota::{QuotaError, QuotaSnapshot};
use crate::domain::user::{check_permission, Permission};
use crate::ports::QuotaRepository;

#[derive(Debug, Clone)]
pub struct ResetQuotaCommand {
    pub actor: AuthenticatedUser,
    pub user_id: UserId,
}

pub struct ResetQuotaHandler {
    quotas: Arc<dyn QuotaRepository>,
    calendar: ServiceCalendar,
}

impl ResetQuotaHandler {
    pub fn new(quotas: Arc<dyn QuotaRepository>, calendar: ServiceCalendar) -> Self {
        Self { quotas, calendar }
    }

    pub async fn handle(&self, cmd: ResetQuotaCommand) -> Result<QuotaSnapshot, QuotaError> {
        check_permission(&cmd.actor, Permission::ManageQuotas)?;

        let today = self.calendar.today();
        let quota = self
            .quotas
            .reset(&cmd.user_id, today)
            .await?
            .ok_or(QuotaError::not_found(cmd.user_id))?;

        info!(user_id = %cmd.user_id, admin_id = %cmd.actor.id, "Daily quota reset");
        Ok(quota.snapshot(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryQuotaRepository;
    use crate::domain::foundation::Role;
    use crate::domain::quota::TokenQuota;

    #[tokio::test]
    async fn reset_clears_usage() {
        let repo = InMemoryQuotaRepository::new();
        let calendar = ServiceCalendar::vietnam();
        let user = UserId::new();
        let mut quota = TokenQuota::new(user, Some(20_000), calendar.today());
        quota.charge(20_000, calendar.today());
        repo.save(&quota).await.unwrap();

        let handler = ResetQuotaHandler::new(Arc::new(repo), calendar);
        let admin = AuthenticatedUser::new(UserId::new(), "qt@example.vn", Role::Admin, None);
        let snapshot = handler
            .handle(ResetQuotaCommand {
                actor: admin,
                user_id: user,
            })
            .await
            .unwrap();

        assert_eq!(snapshot.used_today, 0);
        assert_eq!(snapshot.remaining, Some(20_000));
    }

    #[tokio::test]
    async fn missing_quota_is_not_found() {
        let handler =
            ResetQuotaHandler::new(Arc::new(InMemoryQuotaRepository::new()), ServiceCalendar::vietnam());
        let admin = AuthenticatedUser::new(UserId::new(), "qt@example.vn", Role::Admin, None);
        let user = UserId::new();
        let err = handler
            .handle(ResetQuotaCommand {
                actor: admin,
                user_id: user,
            })
            .await
            .unwrap_err();
        assert_eq!(err, QuotaError::not_found(user));
    }
}
