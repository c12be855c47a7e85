//! In-memory quota repository.
//!
//! A single write lock around read-modify-write gives the same atomicity the
//! Postgres adapter gets from its single UPDATE statement.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::quota::{QuotaReservation, TokenQuota};
use crate::ports::QuotaRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryQuotaRepository {
    quotas: Arc<RwLock<HashMap<UserId, TokenQuota>>>,
}

impl InMemoryQuotaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn modify<F>(&self, user_id: &UserId, f: F) -> Result<Option<TokenQuota>, DomainError>
    where
        F: FnOnce(&mut TokenQuota) + Send,
    {
        let mut quotas = self.quotas.write().await;
        Ok(quotas.get_mut(user_id).map(|quota| {
            f(quota);
            quota.clone()
        }))
    }
}

#[async_trait]
impl QuotaRepository for InMemoryQuotaRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<TokenQuota>, DomainError> {
        Ok(self.quotas.read().await.get(user_id).cloned())
    }

    async fn save(&self, quota: &TokenQuota) -> Result<(), DomainError> {
        self.quotas.write().await.insert(quota.user_id, quota.clone());
        Ok(())
    }

    async fn insert_if_absent(&self, quota: &TokenQuota) -> Result<TokenQuota, DomainError> {
        let mut quotas = self.quotas.write().await;
        Ok(quotas
            .entry(quota.user_id)
            .or_insert_with(|| quota.clone())
            .clone())
    }

    async fn try_reserve(
        &self,
        user_id: &UserId,
        needed: u32,
        budget: u32,
        today: NaiveDate,
    ) -> Result<Option<QuotaReservation>, DomainError> {
        let mut quotas = self.quotas.write().await;
        let Some(quota) = quotas.get_mut(user_id) else {
            return Ok(None);
        };
        let mut candidate = quota.clone();
        match candidate.reserve(needed, budget, today) {
            Ok(reservation) => {
                *quota = candidate;
                Ok(Some(reservation))
            }
            Err(_) => Ok(None),
        }
    }

    async fn settle(
        &self,
        reservation: &QuotaReservation,
        spent: u32,
        today: NaiveDate,
    ) -> Result<Option<TokenQuota>, DomainError> {
        self.modify(&reservation.user_id, |q| q.settle(reservation, spent, today))
            .await
    }

    async fn charge(
        &self,
        user_id: &UserId,
        tokens: u32,
        today: NaiveDate,
    ) -> Result<Option<TokenQuota>, DomainError> {
        self.modify(user_id, |q| q.charge(tokens, today)).await
    }

    async fn reset(
        &self,
        user_id: &UserId,
        today: NaiveDate,
    ) -> Result<Option<TokenQuota>, DomainError> {
        self.modify(user_id, |q| q.reset(today)).await
    }

    async fn set_limit(
        &self,
        user_id: &UserId,
        daily_limit: Option<u32>,
    ) -> Result<Option<TokenQuota>, DomainError> {
        self.modify(user_id, |q| q.set_daily_limit(daily_limit)).await
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<TokenQuota>, DomainError> {
        let quotas = self.quotas.read().await;
        let mut all: Vec<TokenQuota> = quotas.values().cloned().collect();
        all.sort_by(|a, b| b.used_today.cmp(&a.used_today));
        Ok(all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}
