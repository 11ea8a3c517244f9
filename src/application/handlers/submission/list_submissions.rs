//! ListSubmissionsHandler - Every submission across the caller's forms.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::{FormId, SubmissionId, Timestamp, UserId};
use crate::domain::submission::{Submission, SubmissionError, SubmissionStatus};
use crate::domain::validation::SubmissionData;
use crate::ports::{FormRepository, SubmissionRepository};

/// Display value for a missing submitter email or name.
pub const ANONYMOUS: &str = "Anonymous";

/// Display value when a submission's form no longer resolves.
pub const UNKNOWN_FORM: &str = "Unknown Form";

#[derive(Debug, Clone)]
pub struct ListSubmissionsQuery {
    pub owner_id: UserId,
    /// Restrict to one form. Forms the caller does not own yield nothing.
    pub form_id: Option<FormId>,
}

/// Submission as shown in the owner's inbox.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub id: SubmissionId,
    pub form_id: FormId,
    pub form_name: String,
    pub submitted_at: Timestamp,
    pub submitter_email: String,
    pub submitter_name: String,
    pub status: SubmissionStatus,
    pub data: SubmissionData,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl SubmissionView {
    fn from_submission(submission: Submission, form_name: Option<&str>) -> Self {
        Self {
            id: *submission.id(),
            form_id: *submission.form_id(),
            form_name: form_name.unwrap_or(UNKNOWN_FORM).to_string(),
            submitted_at: *submission.submitted_at(),
            submitter_email: submission
                .submitter_email()
                .unwrap_or(ANONYMOUS)
                .to_string(),
            submitter_name: submission.submitter_name().unwrap_or(ANONYMOUS).to_string(),
            status: submission.status(),
            ip_address: submission.client().ip_address.clone(),
            user_agent: submission.client().user_agent.clone(),
            data: submission.data().clone(),
        }
    }
}

pub struct ListSubmissionsHandler {
    forms: Arc<dyn FormRepository>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl ListSubmissionsHandler {
    pub fn new(forms: Arc<dyn FormRepository>, submissions: Arc<dyn SubmissionRepository>) -> Self {
        Self { forms, submissions }
    }

    /// Newest first.
    pub async fn handle(
        &self,
        query: ListSubmissionsQuery,
    ) -> Result<Vec<SubmissionView>, SubmissionError> {
        let forms = self.forms.find_by_owner(&query.owner_id).await?;
        let titles: HashMap<FormId, &str> = forms
            .iter()
            .filter(|f| query.form_id.map_or(true, |wanted| *f.id() == wanted))
            .map(|f| (*f.id(), f.title()))
            .collect();

        if titles.is_empty() {
            return Ok(Vec::new());
        }

        let form_ids: Vec<FormId> = titles.keys().copied().collect();
        let submissions = self.submissions.find_by_forms(&form_ids).await?;

        Ok(submissions
            .into_iter()
            .map(|s| {
                let title = titles.get(s.form_id()).copied();
                SubmissionView::from_submission(s, title)
            })
            .collect())
    }
}
