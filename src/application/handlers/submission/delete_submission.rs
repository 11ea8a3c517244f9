//! DeleteSubmissionHandler - Removes one or many submissions.

use std::sync::Arc;
use tracing::{debug, info};

use super::load_owned;
use crate::domain::foundation::{SubmissionId, UserId};
use crate::domain::submission::SubmissionError;
use crate::ports::{FormRepository, SubmissionRepository};

#[derive(Debug, Clone)]
pub struct DeleteSubmissionCommand {
    pub submission_id: SubmissionId,
    pub caller: UserId,
}

#[derive(Debug, Clone)]
pub struct BulkDeleteSubmissionsCommand {
    pub submission_ids: Vec<SubmissionId>,
    pub caller: UserId,
}

pub struct DeleteSubmissionHandler {
    forms: Arc<dyn FormRepository>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl DeleteSubmissionHandler {
    pub fn new(forms: Arc<dyn FormRepository>, submissions: Arc<dyn SubmissionRepository>) -> Self {
        Self { forms, submissions }
    }

    pub async fn handle(&self, cmd: DeleteSubmissionCommand) -> Result<(), SubmissionError> {
        let submission = load_owned(
            self.submissions.as_ref(),
            self.forms.as_ref(),
            &cmd.submission_id,
            &cmd.caller,
        )
        .await?;

        self.submissions.delete(submission.id()).await?;

        info!(submission_id = %cmd.submission_id, "Submission deleted");
        Ok(())
    }

    /// Deletes every id the caller owns and returns how many were removed.
    pub async fn handle_bulk(
        &self,
        cmd: BulkDeleteSubmissionsCommand,
    ) -> Result<usize, SubmissionError> {
        let mut processed = 0;
        for id in &cmd.submission_ids {
            match load_owned(self.submissions.as_ref(), self.forms.as_ref(), id, &cmd.caller).await
            {
                Ok(_) => {
                    self.submissions.delete(id).await?;
                    processed += 1;
                }
                Err(SubmissionError::Infrastructure(msg)) => {
                    return Err(SubmissionError::Infrastructure(msg));
                }
                Err(err) => {
                    debug!(submission_id = %id, reason = %err, "Skipping submission in bulk delete");
                }
            }
        }

        info!(requested = cmd.submission_ids.len(), processed, "Bulk submission delete");
        Ok(processed)
    }
}
