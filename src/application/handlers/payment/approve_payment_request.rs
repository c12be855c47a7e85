//! ApprovePaymentRequestHandler - confirms a transfer and activates the plan.
//!
//! Order matters: the guarded status update runs first, so only one admin
//! ever reaches the subscription and quota steps for a given request.

use std::sync::Arc;

use tracing::info;

use super::review;
use crate::domain::foundation::{AuthenticatedUser, PaymentRequestId, ServiceCalendar, Timestamp};
use crate::domain::payment::{apply_purchase, PaymentError, PaymentRequest, Subscription};
use crate::domain::quota::TokenQuota;
use crate::domain::user::{check_permission, Permission};
use crate::ports::{PaymentRepository, QuotaRepository, SubscriptionRepository};

#[derive(Debug, Clone)]
pub struct ApprovePaymentRequestCommand {
    pub admin: AuthenticatedUser,
    pub payment_id: PaymentRequestId,
}

#[derive(Debug, Clone)]
pub struct ApprovePaymentRequestResult {
    pub request: PaymentRequest,
    pub subscription: Subscription,
    pub daily_limit: u32,
}

pub struct ApprovePaymentRequestHandler {
    payments: Arc<dyn PaymentRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    quotas: Arc<dyn QuotaRepository>,
    calendar: ServiceCalendar,
}

impl ApprovePaymentRequestHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        quotas: Arc<dyn QuotaRepository>,
        calendar: ServiceCalendar,
    ) -> Self {
        Self {
            payments,
            subscriptions,
            quotas,
            calendar,
        }
    }

    pub async fn handle(
        &self,
        cmd: ApprovePaymentRequestCommand,
    ) -> Result<ApprovePaymentRequestResult, PaymentError> {
        check_permission(&cmd.admin, Permission::ReviewPayments)?;

        let mut request = review::load(self.payments.as_ref(), cmd.payment_id).await?;
        request.approve(cmd.admin.id)?;
        review::persist(self.payments.as_ref(), &request, "approve").await?;

        let now = Timestamp::now();
        let existing = self.subscriptions.find_by_user(&request.user_id).await?;
        let subscription = apply_purchase(existing, request.user_id, request.plan, now);
        self.subscriptions.upsert(&subscription).await?;

        let daily_limit = request.plan.daily_token_limit();
        if self
            .quotas
            .set_limit(&request.user_id, Some(daily_limit))
            .await?
            .is_none()
        {
            let fresh = TokenQuota::new(request.user_id, Some(daily_limit), self.calendar.today());
            if self.quotas.insert_if_absent(&fresh).await?.daily_limit != Some(daily_limit) {
                self.quotas
                    .set_limit(&request.user_id, Some(daily_limit))
                    .await?;
            }
        }

        info!(
            payment_id = %request.id,
            user_id = %request.user_id,
            admin_id = %cmd.admin.id,
            plan = request.plan.code(),
            amount_vnd = request.amount_vnd,
            expires_at = %subscription.expires_at,
            "Payment request approved"
        );

        Ok(ApprovePaymentRequestResult {
            request,
            subscription,
            daily_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryPaymentRepository, InMemoryQuotaRepository, InMemorySubscriptionRepository,
    };
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::payment::{PaymentStatus, Plan};

    struct Fixture {
        payments: InMemoryPaymentRepository,
        subscriptions: InMemorySubscriptionRepository,
        quotas: InMemoryQuotaRepository,
        handler: ApprovePaymentRequestHandler,
    }

    fn fixture() -> Fixture {
        let payments = InMemoryPaymentRepository::new();
        let subscriptions = InMemorySubscriptionRepository::new();
        let quotas = InMemoryQuotaRepository::new();
        let handler = ApprovePaymentRequestHandler::new(
            Arc::new(payments.clone()),
            Arc::new(subscriptions.clone()),
            Arc::new(quotas.clone()),
            ServiceCalendar::vietnam(),
        );
        Fixture {
            payments,
            subscriptions,
            quotas,
            handler,
        }
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "qt@example.vn", Role::Admin, None)
    }

    #[tokio::test]
    async fn approval_starts_subscription_and_raises_limit() {
        let f = fixture();
        let user = UserId::new();
        let today = ServiceCalendar::vietnam().today();
        f.quotas
            .save(&TokenQuota::new(user, Some(20_000), today))
            .await
            .unwrap();
        let request = PaymentRequest::submit(user, Plan::Premium, None).unwrap();
        f.payments.save(&request).await.unwrap();

        let result = f
            .handler
            .handle(ApprovePaymentRequestCommand {
                admin: admin(),
                payment_id: request.id,
            })
            .await
            .unwrap();

        assert_eq!(result.request.status, PaymentStatus::Approved);
        assert_eq!(result.daily_limit, 300_000);
        let stored = f.payments.find_by_id(&request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Approved);
        assert!(stored.reviewed_by.is_some());
        let sub = f.subscriptions.find_by_user(&user).await.unwrap().unwrap();
        assert_eq!(sub.plan, Plan::Premium);
        let quota = f.quotas.find(&user).await.unwrap().unwrap();
        assert_eq!(quota.daily_limit, Some(300_000));
    }

    #[tokio::test]
    async fn approval_creates_missing_quota() {
        let f = fixture();
        let user = UserId::new();
        let request = PaymentRequest::submit(user, Plan::Basic, None).unwrap();
        f.payments.save(&request).await.unwrap();

        f.handler
            .handle(ApprovePaymentRequestCommand {
                admin: admin(),
                payment_id: request.id,
            })
            .await
            .unwrap();

        let quota = f.quotas.find(&user).await.unwrap().unwrap();
        assert_eq!(quota.daily_limit, Some(100_000));
    }

    #[tokio::test]
    async fn second_approval_conflicts() {
        let f = fixture();
        let request = PaymentRequest::submit(UserId::new(), Plan::Basic, None).unwrap();
        f.payments.save(&request).await.unwrap();
        let cmd = ApprovePaymentRequestCommand {
            admin: admin(),
            payment_id: request.id,
        };

        f.handler.handle(cmd.clone()).await.unwrap();
        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err, PaymentError::invalid_state("approved", "approve"));
    }

    #[tokio::test]
    async fn racing_admins_only_one_wins() {
        let f = fixture();
        let user = UserId::new();
        let request = PaymentRequest::submit(user, Plan::Basic, None).unwrap();
        f.payments.save(&request).await.unwrap();
        let handler = Arc::new(f.handler);

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let handler = handler.clone();
                let cmd = ApprovePaymentRequestCommand {
                    admin: admin(),
                    payment_id: request.id,
                };
                tokio::spawn(async move { handler.handle(cmd).await })
            })
            .collect();

        let mut wins = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);

        let sub = f.subscriptions.find_by_user(&user).await.unwrap().unwrap();
        assert_eq!(sub.expires_at, sub.started_at.add_days(30));
    }

    #[tokio::test]
    async fn unknown_request_is_not_found() {
        let f = fixture();
        let id = PaymentRequestId::new();
        let err = f
            .handler
            .handle(ApprovePaymentRequestCommand {
                admin: admin(),
                payment_id: id,
            })
            .await
            .unwrap_err();
        assert_eq!(err, PaymentError::not_found(id));
    }
}
