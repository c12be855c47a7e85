//! PostgreSQL implementation of PaymentRepository.
//!
//! The partial unique index `payment_requests_one_pending_per_user` enforces
//! at most one pending request per user. Reviews are written with a
//! `status = 'pending'` guard so two admins cannot both decide the same row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{decode_error, timestamp};
use crate::domain::foundation::{DomainError, ErrorCode, PaymentRequestId, UserId};
use crate::domain::payment::{PaymentRequest, PaymentStatus, Plan};
use crate::ports::{PaymentFilter, PaymentRepository, PaymentStats};

const ONE_PENDING_CONSTRAINT: &str = "payment_requests_one_pending_per_user";
const TRANSFER_REFERENCE_CONSTRAINT: &str = "payment_requests_transfer_reference_key";

pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    user_id: Uuid,
    plan: String,
    amount_vnd: i64,
    transfer_reference: String,
    status: String,
    note: Option<String>,
    rejection_reason: Option<String>,
    reviewed_by: Option<Uuid>,
    reviewed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for PaymentRequest {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(PaymentRequest {
            id: PaymentRequestId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            plan: row.plan.parse::<Plan>().map_err(|e| decode_error("plan", e))?,
            amount_vnd: row.amount_vnd,
            transfer_reference: row.transfer_reference,
            status: row
                .status
                .parse::<PaymentStatus>()
                .map_err(|e| decode_error("status", e))?,
            note: row.note,
            rejection_reason: row.rejection_reason,
            reviewed_by: row.reviewed_by.map(UserId::from_uuid),
            reviewed_at: row.reviewed_at.map(timestamp),
            created_at: timestamp(row.created_at),
            updated_at: timestamp(row.updated_at),
        })
    }
}

const SELECT_PAYMENT: &str = r#"
    SELECT id, user_id, plan, amount_vnd, transfer_reference, status, note,
           rejection_reason, reviewed_by, reviewed_at, created_at, updated_at
    FROM payment_requests
"#;

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn save(&self, request: &PaymentRequest) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payment_requests (
                id, user_id, plan, amount_vnd, transfer_reference, status, note,
                rejection_reason, reviewed_by, reviewed_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.user_id.as_uuid())
        .bind(request.plan.code())
        .bind(request.amount_vnd)
        .bind(&request.transfer_reference)
        .bind(request.status.as_str())
        .bind(&request.note)
        .bind(&request.rejection_reason)
        .bind(request.reviewed_by.map(|id| *id.as_uuid()))
        .bind(request.reviewed_at.map(|t| *t.as_datetime()))
        .bind(request.created_at.as_datetime())
        .bind(request.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                match db_err.constraint() {
                    Some(ONE_PENDING_CONSTRAINT) => {
                        return DomainError::new(
                            ErrorCode::PendingPaymentExists,
                            "User already has a pending payment request",
                        );
                    }
                    Some(TRANSFER_REFERENCE_CONSTRAINT) => {
                        return DomainError::new(
                            ErrorCode::Conflict,
                            format!(
                                "Transfer reference {} is already in use",
                                request.transfer_reference
                            ),
                        );
                    }
                    _ => {}
                }
            }
            DomainError::database(format!("Failed to save payment request: {}", e))
        })?;

        Ok(())
    }

    async fn update_reviewed(&self, request: &PaymentRequest) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE payment_requests SET
                status = $2,
                rejection_reason = $3,
                reviewed_by = $4,
                reviewed_at = $5,
                updated_at = $6
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.status.as_str())
        .bind(&request.rejection_reason)
        .bind(request.reviewed_by.map(|id| *id.as_uuid()))
        .bind(request.reviewed_at.map(|t| *t.as_datetime()))
        .bind(request.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update payment request: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_by_id(
        &self,
        id: &PaymentRequestId,
    ) -> Result<Option<PaymentRequest>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_PAYMENT))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to find payment request: {}", e)))?;

        row.map(PaymentRequest::try_from).transpose()
    }

    async fn find_pending_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PaymentRequest>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 AND status = 'pending'",
            SELECT_PAYMENT
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find payment request: {}", e)))?;

        row.map(PaymentRequest::try_from).transpose()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PaymentRequest>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_PAYMENT
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list payment requests: {}", e)))?;

        rows.into_iter().map(PaymentRequest::try_from).collect()
    }

    async fn list(&self, filter: PaymentFilter) -> Result<Vec<PaymentRequest>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "{} WHERE ($1::text IS NULL OR status = $1) ORDER BY created_at ASC LIMIT $2 OFFSET $3",
            SELECT_PAYMENT
        ))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(i64::from(filter.limit))
        .bind(i64::from(filter.offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list payment requests: {}", e)))?;

        rows.into_iter().map(PaymentRequest::try_from).collect()
    }

    async fn stats(&self) -> Result<PaymentStats, DomainError> {
        let (pending, approved, rejected, revenue): (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'pending'),
                COUNT(*) FILTER (WHERE status = 'approved'),
                COUNT(*) FILTER (WHERE status = 'rejected'),
                COALESCE(SUM(amount_vnd) FILTER (WHERE status = 'approved'), 0)::BIGINT
            FROM payment_requests
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to compute payment stats: {}", e)))?;

        Ok(PaymentStats {
            pending: pending.max(0) as u64,
            approved: approved.max(0) as u64,
            rejected: rejected.max(0) as u64,
            approved_revenue_vnd: revenue,
        })
    }
}
