//! ListMyPaymentsHandler - the caller's own payment history, newest first.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::payment::{PaymentError, PaymentRequest};
use crate::domain::user::{check_permission, Permission};
use crate::ports::PaymentRepository;

#[derive(Debug, Clone)]
pub struct ListMyPaymentsQuery {
    pub user: AuthenticatedUser,
}

pub struct ListMyPaymentsHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl ListMyPaymentsHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(
        &self,
        query: ListMyPaymentsQuery,
    ) -> Result<Vec<PaymentRequest>, PaymentError> {
        check_permission(&query.user, Permission::ViewOwnPayments)?;
        Ok(self.payments.list_for_user(&query.user.id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPaymentRepository;
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::payment::Plan;

    #[tokio::test]
    async fn only_returns_own_requests() {
        let repo = InMemoryPaymentRepository::new();
        let me = AuthenticatedUser::new(UserId::new(), "me@example.vn", Role::Parent, None);
        repo.save(&PaymentRequest::submit(me.id, Plan::Basic, None).unwrap())
            .await
            .unwrap();
        repo.save(&PaymentRequest::submit(UserId::new(), Plan::Basic, None).unwrap())
            .await
            .unwrap();

        let handler = ListMyPaymentsHandler::new(Arc::new(repo));
        let mine = handler.handle(ListMyPaymentsQuery { user: me.clone() }).await.unwrap();

        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user_id, me.id);
    }
}
