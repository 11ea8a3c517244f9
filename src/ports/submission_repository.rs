//! Submission repository port.
//!
//! Submission creation is the high-volume concurrent path. Each `save` is an
//! independent insert; implementations rely only on atomic single-record writes.

use crate::domain::foundation::{DomainError, FormId, SubmissionId};
use crate::domain::submission::{Submission, SubmissionStatus};
use async_trait::async_trait;

/// Repository port for recorded submissions.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Insert a new, already validated submission.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, submission: &Submission) -> Result<(), DomainError>;

    /// Find a submission by its ID.
    async fn find_by_id(&self, id: &SubmissionId) -> Result<Option<Submission>, DomainError>;

    /// Find all submissions for the given forms, newest first.
    async fn find_by_forms(&self, form_ids: &[FormId]) -> Result<Vec<Submission>, DomainError>;

    /// Set the triage status of a submission.
    ///
    /// # Errors
    ///
    /// - `SubmissionNotFound` if the submission doesn't exist
    async fn update_status(
        &self,
        id: &SubmissionId,
        status: SubmissionStatus,
    ) -> Result<(), DomainError>;

    /// Hard delete a submission.
    ///
    /// # Errors
    ///
    /// - `SubmissionNotFound` if the submission doesn't exist
    async fn delete(&self, id: &SubmissionId) -> Result<(), DomainError>;
}
