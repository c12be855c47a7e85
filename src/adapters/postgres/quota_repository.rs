//! PostgreSQL implementation of QuotaRepository.
//!
//! `charge` and `settle` are single UPDATEs so concurrent requests from the
//! same user cannot lose increments, and the day rollover happens in the same
//! statement. `try_reserve` locks the row with `FOR UPDATE` for the admission
//! check and the hold.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{timestamp, token_count};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::quota::{QuotaReservation, TokenQuota};
use crate::ports::QuotaRepository;

pub struct PostgresQuotaRepository {
    pool: PgPool,
}

impl PostgresQuotaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct QuotaRow {
    user_id: Uuid,
    daily_limit: Option<i64>,
    used_today: i64,
    last_reset_date: NaiveDate,
    updated_at: DateTime<Utc>,
}

impl TryFrom<QuotaRow> for TokenQuota {
    type Error = DomainError;

    fn try_from(row: QuotaRow) -> Result<Self, Self::Error> {
        Ok(TokenQuota {
            user_id: UserId::from_uuid(row.user_id),
            daily_limit: row
                .daily_limit
                .map(|l| token_count(l, "daily_limit"))
                .transpose()?,
            used_today: token_count(row.used_today, "used_today")?,
            last_reset_date: row.last_reset_date,
            updated_at: timestamp(row.updated_at),
        })
    }
}

const RETURNING_QUOTA: &str = "RETURNING user_id, daily_limit, used_today, last_reset_date, updated_at";

#[async_trait]
impl QuotaRepository for PostgresQuotaRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<TokenQuota>, DomainError> {
        let row: Option<QuotaRow> = sqlx::query_as(
            r#"
            SELECT user_id, daily_limit, used_today, last_reset_date, updated_at
            FROM token_quotas
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find quota: {}", e)))?;

        row.map(TokenQuota::try_from).transpose()
    }

    async fn save(&self, quota: &TokenQuota) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO token_quotas (user_id, daily_limit, used_today, last_reset_date, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                daily_limit = EXCLUDED.daily_limit,
                used_today = EXCLUDED.used_today,
                last_reset_date = EXCLUDED.last_reset_date,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(quota.user_id.as_uuid())
        .bind(quota.daily_limit.map(i64::from))
        .bind(i64::from(quota.used_today))
        .bind(quota.last_reset_date)
        .bind(quota.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save quota: {}", e)))?;

        Ok(())
    }

    async fn insert_if_absent(&self, quota: &TokenQuota) -> Result<TokenQuota, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO token_quotas (user_id, daily_limit, used_today, last_reset_date, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(quota.user_id.as_uuid())
        .bind(quota.daily_limit.map(i64::from))
        .bind(i64::from(quota.used_today))
        .bind(quota.last_reset_date)
        .bind(quota.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert quota: {}", e)))?;

        self.find(&quota.user_id).await?.ok_or_else(|| {
            DomainError::database(format!("Quota for {} vanished after insert", quota.user_id))
        })
    }

    async fn try_reserve(
        &self,
        user_id: &UserId,
        needed: u32,
        budget: u32,
        today: NaiveDate,
    ) -> Result<Option<QuotaReservation>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to begin transaction: {}", e)))?;

        let row: Option<QuotaRow> = sqlx::query_as(
            r#"
            SELECT user_id, daily_limit, used_today, last_reset_date, updated_at
            FROM token_quotas
            WHERE user_id = $1
            FOR UPDATE
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to lock quota: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut quota = TokenQuota::try_from(row)?;
        let Ok(reservation) = quota.reserve(needed, budget, today) else {
            // Dropping the transaction rolls back and releases the lock.
            return Ok(None);
        };

        sqlx::query(
            r#"
            UPDATE token_quotas SET
                used_today = $2,
                last_reset_date = $3,
                updated_at = now()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(i64::from(quota.used_today))
        .bind(quota.last_reset_date)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to reserve quota: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit reservation: {}", e)))?;

        Ok(Some(reservation))
    }

    async fn settle(
        &self,
        reservation: &QuotaReservation,
        spent: u32,
        today: NaiveDate,
    ) -> Result<Option<TokenQuota>, DomainError> {
        let row: Option<QuotaRow> = sqlx::query_as(&format!(
            r#"
            UPDATE token_quotas SET
                used_today = CASE
                    WHEN last_reset_date < $4 THEN $3
                    WHEN last_reset_date = $5 THEN GREATEST(used_today - $2, 0) + $3
                    ELSE used_today + $3
                END,
                last_reset_date = GREATEST(last_reset_date, $4),
                updated_at = now()
            WHERE user_id = $1
            {}
            "#,
            RETURNING_QUOTA
        ))
        .bind(reservation.user_id.as_uuid())
        .bind(i64::from(reservation.tokens))
        .bind(i64::from(spent))
        .bind(today)
        .bind(reservation.service_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to settle quota: {}", e)))?;

        row.map(TokenQuota::try_from).transpose()
    }

    async fn charge(
        &self,
        user_id: &UserId,
        tokens: u32,
        today: NaiveDate,
    ) -> Result<Option<TokenQuota>, DomainError> {
        let row: Option<QuotaRow> = sqlx::query_as(&format!(
            r#"
            UPDATE token_quotas SET
                used_today = CASE WHEN last_reset_date < $3 THEN $2 ELSE used_today + $2 END,
                last_reset_date = GREATEST(last_reset_date, $3),
                updated_at = now()
            WHERE user_id = $1
            {}
            "#,
            RETURNING_QUOTA
        ))
        .bind(user_id.as_uuid())
        .bind(i64::from(tokens))
        .bind(today)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to charge quota: {}", e)))?;

        row.map(TokenQuota::try_from).transpose()
    }

    async fn reset(
        &self,
        user_id: &UserId,
        today: NaiveDate,
    ) -> Result<Option<TokenQuota>, DomainError> {
        let row: Option<QuotaRow> = sqlx::query_as(&format!(
            r#"
            UPDATE token_quotas SET
                used_today = 0,
                last_reset_date = $2,
                updated_at = now()
            WHERE user_id = $1
            {}
            "#,
            RETURNING_QUOTA
        ))
        .bind(user_id.as_uuid())
        .bind(today)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to reset quota: {}", e)))?;

        row.map(TokenQuota::try_from).transpose()
    }

    async fn set_limit(
        &self,
        user_id: &UserId,
        daily_limit: Option<u32>,
    ) -> Result<Option<TokenQuota>, DomainError> {
        let row: Option<QuotaRow> = sqlx::query_as(&format!(
            r#"
            UPDATE token_quotas SET
                daily_limit = $2,
                updated_at = now()
            WHERE user_id = $1
            {}
            "#,
            RETURNING_QUOTA
        ))
        .bind(user_id.as_uuid())
        .bind(daily_limit.map(i64::from))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to set quota limit: {}", e)))?;

        row.map(TokenQuota::try_from).transpose()
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<TokenQuota>, DomainError> {
        let rows: Vec<QuotaRow> = sqlx::query_as(
            r#"
            SELECT user_id, daily_limit, used_today, last_reset_date, updated_at
            FROM token_quotas
            ORDER BY used_today DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list quotas: {}", e)))?;

        rows.into_iter().map(TokenQuota::try_from).collect()
    }
}
