//! In-memory payment request repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentRequestId, UserId};
use crate::domain::payment::{PaymentRequest, PaymentStatus};
use crate::ports::{PaymentFilter, PaymentRepository, PaymentStats};

#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentRepository {
    requests: Arc<RwLock<HashMap<PaymentRequestId, PaymentRequest>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, request: &PaymentRequest) -> Result<(), DomainError> {
        let mut requests = self.requests.write().await;
        if request.is_pending()
            && requests
                .values()
                .any(|r| r.user_id == request.user_id && r.is_pending())
        {
            return Err(DomainError::new(
                ErrorCode::PendingPaymentExists,
                format!("User {} already has a pending payment request", request.user_id),
            ));
        }
        if requests
            .values()
            .any(|r| r.id != request.id && r.transfer_reference == request.transfer_reference)
        {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Transfer reference {} is already in use", request.transfer_reference),
            ));
        }
        requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn update_reviewed(&self, request: &PaymentRequest) -> Result<bool, DomainError> {
        let mut requests = self.requests.write().await;
        match requests.get_mut(&request.id) {
            Some(stored) if stored.is_pending() => {
                *stored = request.clone();
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(DomainError::new(
                ErrorCode::PaymentRequestNotFound,
                format!("Payment request not found: {}", request.id),
            )),
        }
    }

    async fn find_by_id(
        &self,
        id: &PaymentRequestId,
    ) -> Result<Option<PaymentRequest>, DomainError> {
        Ok(self.requests.read().await.get(id).cloned())
    }

    async fn find_pending_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PaymentRequest>, DomainError> {
        Ok(self
            .requests
            .read()
            .await
            .values()
            .find(|r| &r.user_id == user_id && r.is_pending())
            .cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PaymentRequest>, DomainError> {
        let requests = self.requests.read().await;
        let mut mine: Vec<PaymentRequest> = requests
            .values()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }

    async fn list(&self, filter: PaymentFilter) -> Result<Vec<PaymentRequest>, DomainError> {
        let requests = self.requests.read().await;
        let mut matching: Vec<PaymentRequest> = requests
            .values()
            .filter(|r| filter.status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn stats(&self) -> Result<PaymentStats, DomainError> {
        let mut stats = PaymentStats::default();
        for request in self.requests.read().await.values() {
            match request.status {
                PaymentStatus::Pending => stats.pending += 1,
                PaymentStatus::Approved => {
                    stats.approved += 1;
                    stats.approved_revenue_vnd += request.amount_vnd;
                }
                PaymentStatus::Rejected => stats.rejected += 1,
            }
        }
        Ok(stats)
    }
}
