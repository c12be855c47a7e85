//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{decode_error, timestamp};
use crate::domain::foundation::{DomainError, ErrorCode, Role, UserId};
use crate::domain::user::UserAccount;
use crate::ports::{RoleCounts, UserFilter, UserRepository};

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    full_name: Option<String>,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserAccount {
            id: UserId::from_uuid(row.id),
            email: row.email,
            full_name: row.full_name,
            role: row.role.parse::<Role>().map_err(|e| decode_error("role", e))?,
            is_active: row.is_active,
            created_at: timestamp(row.created_at),
            updated_at: timestamp(row.updated_at),
        })
    }
}

const SELECT_USER: &str = r#"
    SELECT id, email, full_name, role, is_active, created_at, updated_at
    FROM users
"#;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &UserAccount) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, full_name, role, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return DomainError::new(ErrorCode::Conflict, "User already exists");
                }
            }
            DomainError::database(format!("Failed to save user: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, user: &UserAccount) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                full_name = $3,
                role = $4,
                is_active = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update user: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to find user: {}", e)))?;

        row.map(UserAccount::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("{} WHERE email = lower($1)", SELECT_USER))
                .bind(email.trim())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to find user: {}", e)))?;

        row.map(UserAccount::try_from).transpose()
    }

    async fn list(&self, filter: UserFilter) -> Result<Vec<UserAccount>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "{} WHERE ($1::text IS NULL OR role = $1) ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            SELECT_USER
        ))
        .bind(filter.role.map(|r| r.as_str()))
        .bind(i64::from(filter.limit))
        .bind(i64::from(filter.offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list users: {}", e)))?;

        rows.into_iter().map(UserAccount::try_from).collect()
    }

    async fn count_by_role(&self) -> Result<RoleCounts, DomainError> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT role, COUNT(*) FROM users GROUP BY role")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to count users: {}", e)))?;

        let mut counts = RoleCounts::default();
        for (role, n) in rows {
            let role = role.parse::<Role>().map_err(|e| decode_error("role", e))?;
            counts.add(role, n.max(0) as u64);
        }
        Ok(counts)
    }
}
