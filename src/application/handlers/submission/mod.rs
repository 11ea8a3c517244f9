//! Submission command and query handlers.

mod delete_submission;
mod get_submission_stats;
mod list_submissions;
mod submit_form;
mod update_submission_status;

pub use delete_submission::{
    BulkDeleteSubmissionsCommand, DeleteSubmissionCommand, DeleteSubmissionHandler,
};
pub use get_submission_stats::{GetSubmissionStatsHandler, GetSubmissionStatsQuery};
pub use list_submissions::{
    ListSubmissionsHandler, ListSubmissionsQuery, SubmissionView, ANONYMOUS, UNKNOWN_FORM,
};
pub use submit_form::{SubmitFormCommand, SubmitFormHandler};
pub use update_submission_status::{
    BulkUpdateSubmissionStatusCommand, UpdateSubmissionStatusCommand,
    UpdateSubmissionStatusHandler,
};

use crate::domain::foundation::{OwnedByUser, SubmissionId, UserId};
use crate::domain::submission::{Submission, SubmissionError};
use crate::ports::{FormRepository, SubmissionRepository};

/// Loads a submission and checks that `caller` owns its form.
async fn load_owned(
    submissions: &dyn SubmissionRepository,
    forms: &dyn FormRepository,
    id: &SubmissionId,
    caller: &UserId,
) -> Result<Submission, SubmissionError> {
    let submission = submissions
        .find_by_id(id)
        .await?
        .ok_or(SubmissionError::NotFound(*id))?;

    let form = forms
        .find_by_id(submission.form_id())
        .await?
        .ok_or(SubmissionError::FormNotFound)?;

    form.check_ownership(caller)?;
    Ok(submission)
}
