//! Paid plan period granted by an approved payment.

use serde::Serialize;

use super::Plan;
use crate::domain::foundation::{Timestamp, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub user_id: UserId,
    pub plan: Plan,
    pub started_at: Timestamp,
    pub expires_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    /// New period starting at `now`.
    pub fn start(user_id: UserId, plan: Plan, now: Timestamp) -> Self {
        Self {
            user_id,
            plan,
            started_at: now,
            expires_at: now.add_days(plan.duration_days()),
            updated_at: now,
        }
    }

    /// Applies a newly approved plan purchase.
    ///
    /// An unexpired period is extended from its current end; an expired one
    /// restarts at `now`. The plan is replaced by the one just bought.
    pub fn renew(&mut self, plan: Plan, now: Timestamp) {
        if self.is_active(&now) {
            self.expires_at = self.expires_at.add_days(plan.duration_days());
        } else {
            self.started_at = now;
            self.expires_at = now.add_days(plan.duration_days());
        }
        self.plan = plan;
        self.updated_at = now;
    }

    pub fn is_active(&self, now: &Timestamp) -> bool {
        self.expires_at.is_after(now)
    }
}

/// Starts or renews a subscription for an approved purchase.
pub fn apply_purchase(
    existing: Option<Subscription>,
    user_id: UserId,
    plan: Plan,
    now: Timestamp,
) -> Subscription {
    match existing {
        Some(mut sub) => {
            sub.renew(plan, now);
            sub
        }
        None => Subscription::start(user_id, plan, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(day: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2026, 1, day, 8, 0, 0).unwrap())
    }

    #[test]
    fn start_lasts_plan_duration() {
        let sub = Subscription::start(UserId::new(), Plan::Basic, at(1));
        assert_eq!(sub.expires_at, at(31));
        assert!(sub.is_active(&at(30)));
        assert!(!sub.is_active(&at(31)));
    }

    #[test]
    fn renew_extends_unexpired_period() {
        let mut sub = Subscription::start(UserId::new(), Plan::Basic, at(1));
        sub.renew(Plan::Premium, at(10));
        assert_eq!(sub.started_at, at(1));
        assert_eq!(sub.expires_at, at(31).add_days(30));
        assert_eq!(sub.plan, Plan::Premium);
    }

    #[test]
    fn renew_restarts_expired_period() {
        let mut sub = Subscription::start(UserId::new(), Plan::Basic, at(1));
        let later = at(1).add_days(45);
        sub.renew(Plan::Basic, later);
        assert_eq!(sub.started_at, later);
        assert_eq!(sub.expires_at, later.add_days(30));
    }

    #[test]
    fn apply_purchase_creates_when_missing() {
        let user = UserId::new();
        let sub = apply_purchase(None, user, Plan::Premium, at(5));
        assert_eq!(sub.user_id, user);
        assert_eq!(sub.started_at, at(5));
    }
}
