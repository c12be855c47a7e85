//! Daily token quota accounting.
//!
//! A quota row stores how many LLM tokens the user spent on
//! `last_reset_date`. The counter is lazily zeroed the first time the
//! quota is touched on a later service date, so no scheduled job is needed.

use chrono::NaiveDate;
use serde::Serialize;

use super::QuotaError;
use crate::domain::foundation::{Timestamp, UserId};

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaStatus {
    /// `remaining` is `None` for unlimited quotas.
    Allowed { remaining: Option<u32> },
    Exceeded { used: u32, limit: u32 },
}

impl QuotaStatus {
    pub fn is_allowed(&self) -> bool {
        matches!(self, QuotaStatus::Allowed { .. })
    }
}

/// Read view of a quota as seen on a given service day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaSnapshot {
    pub daily_limit: Option<u32>,
    pub used_today: u32,
    pub remaining: Option<u32>,
    pub service_date: NaiveDate,
}

/// Tokens held for an in-flight LLM call.
///
/// Held tokens count as used until the call is settled, so concurrent
/// requests from the same user cannot all be admitted against the same
/// remaining budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaReservation {
    pub user_id: UserId,
    pub tokens: u32,
    /// Service day the tokens were held on.
    pub service_date: NaiveDate,
}

/// Per-user daily token counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenQuota {
    pub user_id: UserId,
    /// `None` means unlimited.
    pub daily_limit: Option<u32>,
    pub used_today: u32,
    pub last_reset_date: NaiveDate,
    pub updated_at: Timestamp,
}

impl TokenQuota {
    /// Fresh quota with nothing used yet.
    pub fn new(user_id: UserId, daily_limit: Option<u32>, today: NaiveDate) -> Self {
        Self {
            user_id,
            daily_limit,
            used_today: 0,
            last_reset_date: today,
            updated_at: Timestamp::now(),
        }
    }

    /// Zeroes the counter if `today` is a later service date.
    ///
    /// Returns true when a reset happened. A date earlier than the stored
    /// one (clock skew) leaves the quota untouched.
    pub fn refresh(&mut self, today: NaiveDate) -> bool {
        if self.last_reset_date < today {
            self.used_today = 0;
            self.last_reset_date = today;
            self.updated_at = Timestamp::now();
            true
        } else {
            false
        }
    }

    /// Usage as it would be seen on `today`, without mutating.
    pub fn used_on(&self, today: NaiveDate) -> u32 {
        if self.last_reset_date < today {
            0
        } else {
            self.used_today
        }
    }

    /// Tokens left for the stored day; `None` when unlimited.
    pub fn remaining(&self) -> Option<u32> {
        self.daily_limit
            .map(|limit| limit.saturating_sub(self.used_today))
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.daily_limit, Some(limit) if self.used_today >= limit)
    }

    /// Admission check for a request expected to cost `requested` tokens.
    pub fn check(&self, requested: u32, today: NaiveDate) -> QuotaStatus {
        let used = self.used_on(today);
        match self.daily_limit {
            None => QuotaStatus::Allowed { remaining: None },
            Some(limit) if used >= limit || used.saturating_add(requested) > limit => {
                QuotaStatus::Exceeded { used, limit }
            }
            Some(limit) => QuotaStatus::Allowed {
                remaining: Some(limit - used),
            },
        }
    }

    /// Same as [`check`](Self::check) but as a `Result`.
    pub fn admit(&self, requested: u32, today: NaiveDate) -> Result<Option<u32>, QuotaError> {
        match self.check(requested, today) {
            QuotaStatus::Allowed { remaining } => Ok(remaining),
            QuotaStatus::Exceeded { used, limit } => Err(QuotaError::exceeded(used, limit)),
        }
    }

    /// Records tokens actually spent.
    ///
    /// Charged in full even when it pushes usage past the limit.
    pub fn charge(&mut self, tokens: u32, today: NaiveDate) {
        self.refresh(today);
        self.used_today = self.used_today.saturating_add(tokens);
        self.updated_at = Timestamp::now();
    }

    /// Admits a call needing at least `needed` tokens and holds up to
    /// `budget` for it.
    ///
    /// The hold is clipped to what is left of the limit, so once the last
    /// tokens of the day are held every further call is rejected.
    pub fn reserve(
        &mut self,
        needed: u32,
        budget: u32,
        today: NaiveDate,
    ) -> Result<QuotaReservation, QuotaError> {
        self.refresh(today);
        self.admit(needed, today)?;

        let budget = budget.max(needed);
        let held = match self.daily_limit {
            None => budget,
            Some(limit) => budget.min(limit.saturating_sub(self.used_today)),
        };
        self.used_today = self.used_today.saturating_add(held);
        self.updated_at = Timestamp::now();

        Ok(QuotaReservation {
            user_id: self.user_id,
            tokens: held,
            service_date: self.last_reset_date,
        })
    }

    /// Replaces a reservation with the tokens the call actually spent.
    ///
    /// `spent = 0` releases the hold. A reservation from an earlier service
    /// day was already wiped by the rollover, so only `spent` is added.
    pub fn settle(&mut self, reservation: &QuotaReservation, spent: u32, today: NaiveDate) {
        self.refresh(today);
        if self.last_reset_date == reservation.service_date {
            self.used_today = self.used_today.saturating_sub(reservation.tokens);
        }
        self.used_today = self.used_today.saturating_add(spent);
        self.updated_at = Timestamp::now();
    }

    pub fn set_daily_limit(&mut self, limit: Option<u32>) {
        self.daily_limit = limit;
        self.updated_at = Timestamp::now();
    }

    pub fn snapshot(&self, today: NaiveDate) -> QuotaSnapshot {
        let used = self.used_on(today);
        QuotaSnapshot {
            daily_limit: self.daily_limit,
            used_today: used,
            remaining: self.daily_limit.map(|limit| limit.saturating_sub(used)),
            service_date: today.max(self.last_reset_date),
        }
    }

    /// Clears today's usage.
    pub fn reset(&mut self, today: NaiveDate) {
        self.used_today = 0;
        if self.last_reset_date < today {
            self.last_reset_date = today;
        }
        self.updated_at = Timestamp::now();
    }
}
