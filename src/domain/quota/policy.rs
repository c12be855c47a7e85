//! Default daily limits per role.

use chrono::NaiveDate;
use serde::Serialize;

use super::TokenQuota;
use crate::domain::foundation::{Role, UserId};

pub const DEFAULT_PARENT_DAILY_LIMIT: u32 = 20_000;
pub const DEFAULT_TEACHER_DAILY_LIMIT: u32 = 50_000;

/// Limits applied to accounts without a paid plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaPolicy {
    pub parent: Option<u32>,
    pub teacher: Option<u32>,
    pub admin: Option<u32>,
}

impl QuotaPolicy {
    pub fn limit_for(&self, role: Role) -> Option<u32> {
        match role {
            Role::Parent => self.parent,
            Role::Teacher => self.teacher,
            Role::Admin => self.admin,
        }
    }

    /// Fresh quota for a newly provisioned account.
    pub fn quota_for(&self, user_id: UserId, role: Role, today: NaiveDate) -> TokenQuota {
        TokenQuota::new(user_id, self.limit_for(role), today)
    }
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            parent: Some(DEFAULT_PARENT_DAILY_LIMIT),
            teacher: Some(DEFAULT_TEACHER_DAILY_LIMIT),
            admin: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let policy = QuotaPolicy::default();
        assert_eq!(policy.limit_for(Role::Parent), Some(20_000));
        assert_eq!(policy.limit_for(Role::Teacher), Some(50_000));
        assert_eq!(policy.limit_for(Role::Admin), None);
    }

    #[test]
    fn quota_for_starts_empty_with_role_limit() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let quota = QuotaPolicy::default().quota_for(UserId::new(), Role::Teacher, today);
        assert_eq!(quota.daily_limit, Some(50_000));
        assert_eq!(quota.used_today, 0);
        assert_eq!(quota.last_reset_date, today);
    }
}
