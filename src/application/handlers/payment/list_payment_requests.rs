//! ListPaymentRequestsHandler - review queue for admins, oldest first.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::payment::{PaymentError, PaymentRequest};
use crate::domain::user::{check_permission, Permission};
use crate::ports::{PaymentFilter, PaymentRepository};

#[derive(Debug, Clone)]
pub struct ListPaymentRequestsQuery {
    pub user: AuthenticatedUser,
    pub filter: PaymentFilter,
}

pub struct ListPaymentRequestsHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl ListPaymentRequestsHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(
        &self,
        query: ListPaymentRequestsQuery,
    ) -> Result<Vec<PaymentRequest>, PaymentError> {
        check_permission(&query.user, Permission::ReviewPayments)?;
        Ok(self.payments.list(query.filter).await?)
    }
}
