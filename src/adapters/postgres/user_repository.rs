//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::row::{get, optional_timestamp, parse, query_failed, timestamp};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{User, UserRole};
use crate::ports::UserRepository;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, role, deleted, created_at,
                   last_active_at, session_expires_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed("fetch user"))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn upsert(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, token_identifier, email, name, role, deleted, created_at,
                last_active_at, session_expires_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                name = EXCLUDED.name,
                role = EXCLUDED.role,
                deleted = EXCLUDED.deleted,
                last_active_at = EXCLUDED.last_active_at,
                session_expires_at = EXCLUDED.session_expires_at
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.token_identifier())
        .bind(user.email())
        .bind(user.name())
        .bind(user.role().as_str())
        .bind(user.is_deleted())
        .bind(user.created_at().as_datetime())
        .bind(user.last_active_at().map(|t| *t.as_datetime()))
        .bind(user.session_expires_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(query_failed("upsert user"))?;

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(query_failed("delete user"))?;

        Ok(())
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let id: String = get(row, "id")?;
    let role: String = get(row, "role")?;

    Ok(User::reconstitute(
        UserId::new(id).map_err(DomainError::from)?,
        get(row, "email")?,
        get(row, "name")?,
        parse::<UserRole>(&role, "user role")?,
        get(row, "deleted")?,
        timestamp(row, "created_at")?,
        optional_timestamp(row, "last_active_at")?,
        optional_timestamp(row, "session_expires_at")?,
    ))
}
