//! Submission aggregate.
//!
//! A submission is one set of answers recorded against a published form.
//! It is validated once, at creation, and never re-validated afterwards.

use serde::{Deserialize, Serialize};

use super::SubmissionStatus;
use crate::domain::form::FormSchema;
use crate::domain::foundation::{
    AuthenticatedUser, FormId, StateMachine, SubmissionId, Timestamp, UserId,
};
use crate::domain::validation::{evaluate_submission, SubmissionData, SubmissionRejection};

/// Request metadata captured alongside a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Everything a submitter sends for one submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionInput {
    pub data: SubmissionData,
    pub submitter_email: Option<String>,
    pub submitter_name: Option<String>,
    pub client: ClientInfo,
}

/// Recorded submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    id: SubmissionId,
    form_id: FormId,
    data: SubmissionData,
    submitted_by: Option<UserId>,
    submitter_email: Option<String>,
    submitter_name: Option<String>,
    submitted_at: Timestamp,
    status: SubmissionStatus,
    client: ClientInfo,
}

impl Submission {
    /// Runs the acceptance gates and, if they all pass, builds a new submission.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the form is not published
    /// - `Unauthorized` if the caller is anonymous and the form requires sign-in
    /// - `Invalid` with the full error map if any field fails validation
    pub fn accept(
        form: &FormSchema,
        input: SubmissionInput,
        caller: Option<&AuthenticatedUser>,
    ) -> Result<Self, SubmissionRejection> {
        let submitter_email = normalize(input.submitter_email);
        evaluate_submission(form, &input.data, submitter_email.as_deref(), caller)?;

        Ok(Self {
            id: SubmissionId::new(),
            form_id: *form.id(),
            data: input.data,
            submitted_by: caller.map(|c| c.id.clone()),
            submitter_email,
            submitter_name: normalize(input.submitter_name),
            submitted_at: Timestamp::now(),
            status: SubmissionStatus::New,
            client: input.client,
        })
    }

    /// Reconstitute a submission from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SubmissionId,
        form_id: FormId,
        data: SubmissionData,
        submitted_by: Option<UserId>,
        submitter_email: Option<String>,
        submitter_name: Option<String>,
        submitted_at: Timestamp,
        status: SubmissionStatus,
        client: ClientInfo,
    ) -> Self {
        Self {
            id,
            form_id,
            data,
            submitted_by,
            submitter_email,
            submitter_name,
            submitted_at,
            status,
            client,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SubmissionId {
        &self.id
    }

    pub fn form_id(&self) -> &FormId {
        &self.form_id
    }

    pub fn data(&self) -> &SubmissionData {
        &self.data
    }

    /// The signed-in submitter, or `None` for anonymous submissions.
    pub fn submitted_by(&self) -> Option<&UserId> {
        self.submitted_by.as_ref()
    }

    pub fn submitter_email(&self) -> Option<&str> {
        self.submitter_email.as_deref()
    }

    pub fn submitter_name(&self) -> Option<&str> {
        self.submitter_name.as_deref()
    }

    pub fn submitted_at(&self) -> &Timestamp {
        &self.submitted_at
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn client(&self) -> &ClientInfo {
        &self.client
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Move to a new triage status. Returns false, leaving the submission
    /// untouched, when `status` is already current.
    ///
    /// Ownership is checked by the caller against the parent form.
    pub fn set_status(&mut self, status: SubmissionStatus) -> bool {
        if !self.status.can_transition_to(&status) {
            return false;
        }
        self.status = status;
        true
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
