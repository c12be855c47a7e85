//! GetAdminStatsHandler - dashboard counters.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::user::{check_permission, Permission, UserError};
use crate::ports::{PaymentRepository, PaymentStats, RoleCounts, UserRepository};

#[derive(Debug, Clone)]
pub struct GetAdminStatsQuery {
    pub actor: AuthenticatedUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub users_by_role: RoleCounts,
    pub payments: PaymentStats,
}

pub struct GetAdminStatsHandler {
    users: Arc<dyn UserRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl GetAdminStatsHandler {
    pub fn new(users: Arc<dyn UserRepository>, payments: Arc<dyn PaymentRepository>) -> Self {
        Self { users, payments }
    }

    pub async fn handle(&self, query: GetAdminStatsQuery) -> Result<AdminStats, UserError> {
        check_permission(&query.actor, Permission::ViewAdminStats)?;

        let users_by_role = self.users.count_by_role().await?;
        let payments = self.payments.stats().await?;
        Ok(AdminStats {
            total_users: users_by_role.total(),
            users_by_role,
            payments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryPaymentRepository, InMemoryUserRepository};
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::payment::{PaymentRequest, Plan};
    use crate::domain::user::UserAccount;

    #[tokio::test]
    async fn aggregates_users_and_payments() {
        let users = InMemoryUserRepository::new();
        let payments = InMemoryPaymentRepository::new();
        let parent = UserAccount::register(UserId::new(), "ph@example.vn", None).unwrap();
        users.save(&parent).await.unwrap();
        let mut request = PaymentRequest::submit(parent.id, Plan::Premium, None).unwrap();
        payments.save(&request).await.unwrap();
        request.approve(UserId::new()).unwrap();
        payments.update_reviewed(&request).await.unwrap();

        let handler = GetAdminStatsHandler::new(Arc::new(users), Arc::new(payments));
        let admin = AuthenticatedUser::new(UserId::new(), "qt@example.vn", Role::Admin, None);
        let stats = handler.handle(GetAdminStatsQuery { actor: admin }).await.unwrap();

        assert_eq!(stats.total_users, 1);
        assert_eq!(stats.users_by_role.parent, 1);
        assert_eq!(stats.payments.approved, 1);
        assert_eq!(stats.payments.approved_revenue_vnd, 199_000);
    }
}
