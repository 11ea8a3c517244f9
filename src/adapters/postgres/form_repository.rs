//! PostgreSQL implementation of FormRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::row::{get, optional_timestamp, parse, query_failed, timestamp};
use crate::domain::form::{FormElement, FormSchema, FormStatus};
use crate::domain::foundation::{DomainError, ErrorCode, FormId, OwnedByUser, UserId};
use crate::ports::FormRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, owner_id, title, description, elements, status, published_at,
           share_url, embed_code, allow_anonymous, collect_emails,
           created_at, updated_at
    FROM forms
"#;

/// PostgreSQL implementation of FormRepository.
#[derive(Clone)]
pub struct PostgresFormRepository {
    pool: PgPool,
}

impl PostgresFormRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FormRepository for PostgresFormRepository {
    async fn save(&self, form: &FormSchema) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO forms (
                id, owner_id, title, description, elements, status, published_at,
                share_url, embed_code, allow_anonymous, collect_emails,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(form.id().as_uuid())
        .bind(form.owner_id().as_str())
        .bind(form.title())
        .bind(form.description())
        .bind(elements_to_json(form.elements())?)
        .bind(form.status().as_str())
        .bind(form.published_at().map(|t| *t.as_datetime()))
        .bind(form.share_url())
        .bind(form.embed_code())
        .bind(form.allow_anonymous())
        .bind(form.collect_emails())
        .bind(form.created_at().as_datetime())
        .bind(form.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(query_failed("insert form"))?;

        Ok(())
    }

    async fn update(&self, form: &FormSchema) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE forms SET
                title = $2,
                description = $3,
                elements = $4,
                status = $5,
                published_at = $6,
                share_url = $7,
                embed_code = $8,
                allow_anonymous = $9,
                collect_emails = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(form.id().as_uuid())
        .bind(form.title())
        .bind(form.description())
        .bind(elements_to_json(form.elements())?)
        .bind(form.status().as_str())
        .bind(form.published_at().map(|t| *t.as_datetime()))
        .bind(form.share_url())
        .bind(form.embed_code())
        .bind(form.allow_anonymous())
        .bind(form.collect_emails())
        .bind(form.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(query_failed("update form"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(form.id()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &FormId) -> Result<Option<FormSchema>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("fetch form"))?;

        row.as_ref().map(row_to_form).transpose()
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<FormSchema>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE owner_id = $1 ORDER BY updated_at DESC",
            SELECT_COLUMNS
        ))
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed("fetch forms by owner"))?;

        rows.iter().map(row_to_form).collect()
    }

    async fn delete(&self, id: &FormId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM forms WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(query_failed("delete form"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn not_found(id: &FormId) -> DomainError {
    DomainError::new(ErrorCode::FormNotFound, format!("Form not found: {}", id))
}

fn elements_to_json(elements: &[FormElement]) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(elements)
        .map_err(|e| DomainError::database(format!("Failed to encode elements: {}", e)))
}

fn row_to_form(row: &PgRow) -> Result<FormSchema, DomainError> {
    let elements: serde_json::Value = get(row, "elements")?;
    let elements: Vec<FormElement> = serde_json::from_value(elements)
        .map_err(|e| DomainError::database(format!("Failed to decode elements: {}", e)))?;
    let status: String = get(row, "status")?;
    let owner_id: String = get(row, "owner_id")?;

    Ok(FormSchema::reconstitute(
        FormId::from_uuid(get(row, "id")?),
        UserId::new(owner_id).map_err(DomainError::from)?,
        get(row, "title")?,
        get(row, "description")?,
        elements,
        parse::<FormStatus>(&status, "form status")?,
        optional_timestamp(row, "published_at")?,
        get(row, "share_url")?,
        get(row, "embed_code")?,
        get(row, "allow_anonymous")?,
        get(row, "collect_emails")?,
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}
