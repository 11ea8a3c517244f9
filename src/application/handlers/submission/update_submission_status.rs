//! UpdateSubmissionStatusHandler - Triage for one or many submissions.

use std::sync::Arc;
use tracing::{debug, info};

use super::load_owned;
use crate::domain::foundation::{SubmissionId, UserId};
use crate::domain::submission::{SubmissionError, SubmissionStatus};
use crate::ports::{FormRepository, SubmissionRepository};

#[derive(Debug, Clone)]
pub struct UpdateSubmissionStatusCommand {
    pub submission_id: SubmissionId,
    pub caller: UserId,
    pub status: SubmissionStatus,
}

#[derive(Debug, Clone)]
pub struct BulkUpdateSubmissionStatusCommand {
    pub submission_ids: Vec<SubmissionId>,
    pub caller: UserId,
    pub status: SubmissionStatus,
}

pub struct UpdateSubmissionStatusHandler {
    forms: Arc<dyn FormRepository>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl UpdateSubmissionStatusHandler {
    pub fn new(forms: Arc<dyn FormRepository>, submissions: Arc<dyn SubmissionRepository>) -> Self {
        Self { forms, submissions }
    }

    pub async fn handle(&self, cmd: UpdateSubmissionStatusCommand) -> Result<(), SubmissionError> {
        let submission = load_owned(
            self.submissions.as_ref(),
            self.forms.as_ref(),
            &cmd.submission_id,
            &cmd.caller,
        )
        .await?;

        if submission.status() != cmd.status {
            self.submissions
                .update_status(submission.id(), cmd.status)
                .await?;
        }

        info!(submission_id = %cmd.submission_id, status = %cmd.status, "Submission status updated");
        Ok(())
    }

    /// Updates every id the caller owns. Missing or foreign ids are skipped.
    ///
    /// Returns the number of submissions processed.
    pub async fn handle_bulk(
        &self,
        cmd: BulkUpdateSubmissionStatusCommand,
    ) -> Result<usize, SubmissionError> {
        let mut processed = 0;
        for id in &cmd.submission_ids {
            match load_owned(self.submissions.as_ref(), self.forms.as_ref(), id, &cmd.caller).await
            {
                Ok(submission) => {
                    if submission.status() != cmd.status {
                        self.submissions.update_status(id, cmd.status).await?;
                    }
                    processed += 1;
                }
                Err(SubmissionError::Infrastructure(msg)) => {
                    return Err(SubmissionError::Infrastructure(msg));
                }
                Err(err) => {
                    debug!(submission_id = %id, reason = %err, "Skipping submission in bulk update");
                }
            }
        }

        info!(
            requested = cmd.submission_ids.len(),
            processed,
            status = %cmd.status,
            "Bulk submission status update"
        );
        Ok(processed)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{owner, stranger, Fixture};
    use super::*;

    fn handler(fixture: &Fixture) -> UpdateSubmissionStatusHandler {
        UpdateSubmissionStatusHandler::new(fixture.forms.clone(), fixture.submissions.clone())
    }

    #[tokio::test]
    async fn owner_marks_submission_reviewed() {
        let fixture = Fixture::new().await;
        let submission = fixture.add_submission("a").await;

        handler(&fixture)
            .handle(UpdateSubmissionStatusCommand {
                submission_id: *submission.id(),
                caller: owner(),
                status: SubmissionStatus::Reviewed,
            })
            .await
            .unwrap();

        let stored = fixture
            .submissions
            .find_by_id(submission.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), SubmissionStatus::Reviewed);
    }

    #[tokio::test]
    async fn stranger_is_forbidden() {
        let fixture = Fixture::new().await;
        let submission = fixture.add_submission("a").await;

        let result = handler(&fixture)
            .handle(UpdateSubmissionStatusCommand {
                submission_id: *submission.id(),
                caller: stranger(),
                status: SubmissionStatus::Archived,
            })
            .await;

        assert_eq!(result.unwrap_err(), SubmissionError::Forbidden);
    }

    #[tokio::test]
    async fn missing_submission_is_not_found() {
        let fixture = Fixture::new().await;
        let id = SubmissionId::new();

        let result = handler(&fixture)
            .handle(UpdateSubmissionStatusCommand {
                submission_id: id,
                caller: owner(),
                status: SubmissionStatus::Archived,
            })
            .await;

        assert_eq!(result.unwrap_err(), SubmissionError::NotFound(id));
    }

    #[tokio::test]
    async fn bulk_skips_missing_ids() {
        let fixture = Fixture::new().await;
        let a = fixture.add_submission("a").await;
        let b = fixture.add_submission("b").await;

        let processed = handler(&fixture)
            .handle_bulk(BulkUpdateSubmissionStatusCommand {
                submission_ids: vec![*a.id(), SubmissionId::new(), *b.id()],
                caller: owner(),
                status: SubmissionStatus::Archived,
            })
            .await
            .unwrap();

        assert_eq!(processed, 2);
    }

    #[tokio::test]
    async fn bulk_by_stranger_changes_nothing() {
        let fixture = Fixture::new().await;
        let a = fixture.add_submission("a").await;

        let processed = handler(&fixture)
            .handle_bulk(BulkUpdateSubmissionStatusCommand {
                submission_ids: vec![*a.id()],
                caller: stranger(),
                status: SubmissionStatus::Archived,
            })
            .await
            .unwrap();

        assert_eq!(processed, 0);
        let stored = fixture.submissions.find_by_id(a.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), SubmissionStatus::New);
    }
}
