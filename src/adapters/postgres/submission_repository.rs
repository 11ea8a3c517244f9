//! PostgreSQL implementation of SubmissionRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::row::{get, parse, query_failed, timestamp};
use crate::domain::foundation::{DomainError, ErrorCode, FormId, SubmissionId, UserId};
use crate::domain::submission::{ClientInfo, Submission, SubmissionStatus};
use crate::domain::validation::SubmissionData;
use crate::ports::SubmissionRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, form_id, data, submitted_by, submitter_email, submitter_name,
           submitted_at, status, ip_address, user_agent
    FROM submissions
"#;

/// PostgreSQL implementation of SubmissionRepository.
#[derive(Clone)]
pub struct PostgresSubmissionRepository {
    pool: PgPool,
}

impl PostgresSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissionRepository {
    async fn save(&self, submission: &Submission) -> Result<(), DomainError> {
        let data = serde_json::to_value(submission.data())
            .map_err(|e| DomainError::database(format!("Failed to encode data: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO submissions (
                id, form_id, data, submitted_by, submitter_email, submitter_name,
                submitted_at, status, ip_address, user_agent
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(submission.id().as_uuid())
        .bind(submission.form_id().as_uuid())
        .bind(data)
        .bind(submission.submitted_by().map(UserId::as_str))
        .bind(submission.submitter_email())
        .bind(submission.submitter_name())
        .bind(submission.submitted_at().as_datetime())
        .bind(submission.status().as_str())
        .bind(submission.client().ip_address.as_deref())
        .bind(submission.client().user_agent.as_deref())
        .execute(&self.pool)
        .await
        .map_err(query_failed("insert submission"))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SubmissionId) -> Result<Option<Submission>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("fetch submission"))?;

        row.as_ref().map(row_to_submission).transpose()
    }

    async fn find_by_forms(&self, form_ids: &[FormId]) -> Result<Vec<Submission>, DomainError> {
        if form_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = form_ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = sqlx::query(&format!(
            "{} WHERE form_id = ANY($1) ORDER BY submitted_at DESC",
            SELECT_COLUMNS
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed("fetch submissions by form"))?;

        rows.iter().map(row_to_submission).collect()
    }

    async fn update_status(
        &self,
        id: &SubmissionId,
        status: SubmissionStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE submissions SET status = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(query_failed("update submission status"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn delete(&self, id: &SubmissionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(query_failed("delete submission"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

fn not_found(id: &SubmissionId) -> DomainError {
    DomainError::new(
        ErrorCode::SubmissionNotFound,
        format!("Submission not found: {}", id),
    )
}

fn row_to_submission(row: &PgRow) -> Result<Submission, DomainError> {
    let data: serde_json::Value = get(row, "data")?;
    let data: SubmissionData = serde_json::from_value(data)
        .map_err(|e| DomainError::database(format!("Failed to decode data: {}", e)))?;
    let submitted_by: Option<String> = get(row, "submitted_by")?;
    let submitted_by = submitted_by
        .map(UserId::new)
        .transpose()
        .map_err(DomainError::from)?;
    let status: String = get(row, "status")?;

    Ok(Submission::reconstitute(
        SubmissionId::from_uuid(get(row, "id")?),
        FormId::from_uuid(get(row, "form_id")?),
        data,
        submitted_by,
        get(row, "submitter_email")?,
        get(row, "submitter_name")?,
        timestamp(row, "submitted_at")?,
        parse::<SubmissionStatus>(&status, "submission status")?,
        ClientInfo {
            ip_address: get(row, "ip_address")?,
            user_agent: get(row, "user_agent")?,
        },
    ))
}
