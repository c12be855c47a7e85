//! GetMyQuotaHandler - the caller's usage for the current service day.

use crate::application::handlers::QuotaMeter;
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::quota::{QuotaError, QuotaSnapshot};

#[derive(Debug, Clone)]
pub struct GetMyQuotaQuery {
    pub user: AuthenticatedUser,
}

pub struct GetMyQuotaHandler {
    meter: QuotaMeter,
}

impl GetMyQuotaHandler {
    pub fn new(meter: QuotaMeter) -> Self {
        Self { meter }
    }

    pub async fn handle(&self, query: GetMyQuotaQuery) -> Result<QuotaSnapshot, QuotaError> {
        self.meter.snapshot(&query.user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryQuotaRepository, InMemorySubscriptionRepository};
    use crate::domain::foundation::{Role, ServiceCalendar, UserId};
    use crate::domain::quota::{QuotaPolicy, TokenQuota};
    use crate::ports::QuotaRepository;
    use std::sync::Arc;

    #[tokio::test]
    async fn usage_from_a_previous_day_reads_as_zero() {
        let repo = InMemoryQuotaRepository::new();
        let calendar = ServiceCalendar::vietnam();
        let user = AuthenticatedUser::new(UserId::new(), "ph@example.vn", Role::Parent, None);
        let yesterday = calendar.today().pred_opt().unwrap();
        let mut quota = TokenQuota::new(user.id, Some(20_000), yesterday);
        quota.charge(15_000, yesterday);
        repo.save(&quota).await.unwrap();

        let handler = GetMyQuotaHandler::new(QuotaMeter::new(
            Arc::new(repo),
            Arc::new(InMemorySubscriptionRepository::new()),
            QuotaPolicy::default(),
            calendar,
        ));
        let snapshot = handler.handle(GetMyQuotaQuery { user }).await.unwrap();

        assert_eq!(snapshot.used_today, 0);
        assert_eq!(snapshot.remaining, Some(20_000));
        assert_eq!(snapshot.service_date, calendar.today());
    }
}
