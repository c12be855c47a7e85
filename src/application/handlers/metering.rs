//! Quota lookups shared by the LLM-backed handlers.
//!
//! Quotas are created lazily with the role's default limit, so accounts
//! provisioned before a quota row existed still get metered. A limit raised
//! by a plan purchase falls back to the role default once the subscription
//! has expired.
//!
//! LLM calls hold their worst-case cost with [`QuotaMeter::reserve`] before
//! the provider is called and replace it with the reported usage through
//! [`QuotaMeter::settle`]. Concurrent calls therefore see each other's
//! holds instead of all passing the same pre-call check.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{AuthenticatedUser, ServiceCalendar, Timestamp};
use crate::domain::quota::{QuotaError, QuotaPolicy, QuotaReservation, QuotaSnapshot, TokenQuota};
use crate::ports::{QuotaRepository, SubscriptionRepository};

#[derive(Clone)]
pub struct QuotaMeter {
    quotas: Arc<dyn QuotaRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    policy: QuotaPolicy,
    calendar: ServiceCalendar,
}

impl QuotaMeter {
    pub fn new(
        quotas: Arc<dyn QuotaRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        policy: QuotaPolicy,
        calendar: ServiceCalendar,
    ) -> Self {
        Self {
            quotas,
            subscriptions,
            policy,
            calendar,
        }
    }

    pub fn calendar(&self) -> ServiceCalendar {
        self.calendar
    }

    /// Stored quota for the user, creating the default one if missing.
    pub async fn current(&self, user: &AuthenticatedUser) -> Result<TokenQuota, QuotaError> {
        let quota = match self.quotas.find(&user.id).await? {
            Some(quota) => quota,
            None => {
                let fresh = self
                    .policy
                    .quota_for(user.id, user.role, self.calendar.today());
                let stored = self.quotas.insert_if_absent(&fresh).await?;
                info!(user_id = %user.id, role = %user.role, limit = ?stored.daily_limit, "Created default quota");
                stored
            }
        };
        self.expire_plan_limit(user, quota).await
    }

    /// Drops a plan limit back to the role default once its subscription has
    /// run out. Limits that do not match the plan were set by an admin and
    /// are left alone.
    async fn expire_plan_limit(
        &self,
        user: &AuthenticatedUser,
        quota: TokenQuota,
    ) -> Result<TokenQuota, QuotaError> {
        let default_limit = self.policy.limit_for(user.role);
        if quota.daily_limit == default_limit {
            return Ok(quota);
        }
        let Some(subscription) = self.subscriptions.find_by_user(&user.id).await? else {
            return Ok(quota);
        };
        if subscription.is_active(&Timestamp::now())
            || quota.daily_limit != Some(subscription.plan.daily_token_limit())
        {
            return Ok(quota);
        }

        info!(
            user_id = %user.id,
            plan = subscription.plan.code(),
            expired_at = %subscription.expires_at,
            "Plan expired, restoring default quota limit"
        );
        Ok(self
            .quotas
            .set_limit(&user.id, default_limit)
            .await?
            .unwrap_or(quota))
    }

    pub async fn snapshot(&self, user: &AuthenticatedUser) -> Result<QuotaSnapshot, QuotaError> {
        let quota = self.current(user).await?;
        Ok(quota.snapshot(self.calendar.today()))
    }

    /// Holds up to `budget` tokens for a call whose prompt needs `needed`.
    ///
    /// Fails with `QuotaError::Exceeded` if the prompt alone would not fit.
    pub async fn reserve(
        &self,
        user: &AuthenticatedUser,
        needed: u32,
        budget: u32,
    ) -> Result<QuotaReservation, QuotaError> {
        let today = self.calendar.today();
        let quota = self.current(user).await?;
        quota.admit(needed, today)?;

        if let Some(reservation) = self
            .quotas
            .try_reserve(&user.id, needed, budget, today)
            .await?
        {
            return Ok(reservation);
        }

        // Another call took the remaining budget in between.
        let quota = self
            .quotas
            .find(&user.id)
            .await?
            .ok_or_else(|| QuotaError::not_found(user.id))?;
        quota.admit(needed, today)?;
        Err(QuotaError::exceeded(
            quota.used_on(today),
            quota.daily_limit.unwrap_or_default(),
        ))
    }

    /// Replaces the hold with the tokens actually spent. Settling with zero
    /// releases the hold.
    pub async fn settle(
        &self,
        user: &AuthenticatedUser,
        reservation: &QuotaReservation,
        spent: u32,
    ) -> Result<QuotaSnapshot, QuotaError> {
        let today = self.calendar.today();
        let quota = self
            .quotas
            .settle(reservation, spent, today)
            .await?
            .ok_or_else(|| QuotaError::not_found(user.id))?;
        Ok(quota.snapshot(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryQuotaRepository, InMemorySubscriptionRepository};
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::payment::{Plan, Subscription};

    struct Fixture {
        quotas: InMemoryQuotaRepository,
        subscriptions: InMemorySubscriptionRepository,
        meter: QuotaMeter,
    }

    fn fixture() -> Fixture {
        let quotas = InMemoryQuotaRepository::new();
        let subscriptions = InMemorySubscriptionRepository::new();
        let meter = QuotaMeter::new(
            Arc::new(quotas.clone()),
            Arc::new(subscriptions.clone()),
            QuotaPolicy::default(),
            ServiceCalendar::vietnam(),
        );
        Fixture {
            quotas,
            subscriptions,
            meter,
        }
    }

    fn parent() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "ph@example.vn", Role::Parent, None)
    }

    fn today() -> chrono::NaiveDate {
        ServiceCalendar::vietnam().today()
    }

    #[tokio::test]
    async fn current_creates_default_quota_once() {
        let f = fixture();
        let user = parent();

        let quota = f.meter.current(&user).await.unwrap();
        assert_eq!(quota.daily_limit, Some(20_000));
        assert!(f.quotas.find(&user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn lazy_creation_keeps_usage_already_stored() {
        let f = fixture();
        let user = parent();
        let mut quota = TokenQuota::new(user.id, Some(20_000), today());
        quota.charge(700, today());
        f.quotas.save(&quota).await.unwrap();

        let quota = f.meter.current(&user).await.unwrap();
        assert_eq!(quota.used_today, 700);
    }

    #[tokio::test]
    async fn reserve_then_settle() {
        let f = fixture();
        let user = parent();

        let reservation = f.meter.reserve(&user, 100, 2_000).await.unwrap();
        assert_eq!(reservation.tokens, 2_000);
        assert_eq!(f.quotas.find(&user.id).await.unwrap().unwrap().used_today, 2_000);

        let snapshot = f.meter.settle(&user, &reservation, 19_950).await.unwrap();
        assert_eq!(snapshot.remaining, Some(50));

        let err = f.meter.reserve(&user, 100, 2_000).await.unwrap_err();
        assert_eq!(err, QuotaError::exceeded(19_950, 20_000));
    }

    #[tokio::test]
    async fn expired_plan_falls_back_to_role_default() {
        let f = fixture();
        let user = parent();
        let bought = Timestamp::now().add_days(-40);
        f.subscriptions
            .upsert(&Subscription::start(user.id, Plan::Premium, bought))
            .await
            .unwrap();
        f.quotas
            .save(&TokenQuota::new(
                user.id,
                Some(Plan::Premium.daily_token_limit()),
                today(),
            ))
            .await
            .unwrap();

        let snapshot = f.meter.snapshot(&user).await.unwrap();

        assert_eq!(snapshot.daily_limit, Some(20_000));
        assert_eq!(
            f.quotas.find(&user.id).await.unwrap().unwrap().daily_limit,
            Some(20_000)
        );
    }

    #[tokio::test]
    async fn active_plan_keeps_its_limit() {
        let f = fixture();
        let user = parent();
        f.subscriptions
            .upsert(&Subscription::start(user.id, Plan::Premium, Timestamp::now()))
            .await
            .unwrap();
        f.quotas
            .save(&TokenQuota::new(
                user.id,
                Some(Plan::Premium.daily_token_limit()),
                today(),
            ))
            .await
            .unwrap();

        let quota = f.meter.current(&user).await.unwrap();
        assert_eq!(quota.daily_limit, Some(Plan::Premium.daily_token_limit()));
    }

    #[tokio::test]
    async fn admin_override_survives_expired_plan() {
        let f = fixture();
        let user = parent();
        f.subscriptions
            .upsert(&Subscription::start(
                user.id,
                Plan::Basic,
                Timestamp::now().add_days(-60),
            ))
            .await
            .unwrap();
        f.quotas
            .save(&TokenQuota::new(user.id, Some(123_456), today()))
            .await
            .unwrap();

        let quota = f.meter.current(&user).await.unwrap();
        assert_eq!(quota.daily_limit, Some(123_456));
    }
}
