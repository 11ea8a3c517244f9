use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, FormId, SubmissionId};
use crate::domain::submission::{Submission, SubmissionStatus};
use crate::ports::SubmissionRepository;

/// Submission store keyed by id.
#[derive(Default)]
pub struct InMemorySubmissionRepository {
    submissions: RwLock<HashMap<SubmissionId, Submission>>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored submissions.
    pub async fn len(&self) -> usize {
        self.submissions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.submissions.read().await.is_empty()
    }
}

fn not_found(id: &SubmissionId) -> DomainError {
    DomainError::new(
        ErrorCode::SubmissionNotFound,
        format!("Submission not found: {}", id),
    )
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn save(&self, submission: &Submission) -> Result<(), DomainError> {
        self.submissions
            .write()
            .await
            .insert(*submission.id(), submission.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SubmissionId) -> Result<Option<Submission>, DomainError> {
        Ok(self.submissions.read().await.get(id).cloned())
    }

    async fn find_by_forms(&self, form_ids: &[FormId]) -> Result<Vec<Submission>, DomainError> {
        let mut found: Vec<Submission> = self
            .submissions
            .read()
            .await
            .values()
            .filter(|s| form_ids.contains(s.form_id()))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.submitted_at().cmp(a.submitted_at()));
        Ok(found)
    }

    async fn update_status(
        &self,
        id: &SubmissionId,
        status: SubmissionStatus,
    ) -> Result<(), DomainError> {
        let mut submissions = self.submissions.write().await;
        let submission = submissions.get_mut(id).ok_or_else(|| not_found(id))?;
        submission.set_status(status);
        Ok(())
    }

    async fn delete(&self, id: &SubmissionId) -> Result<(), DomainError> {
        self.submissions
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}
