//! Request and response bodies for public endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::SubmissionId;
use crate::domain::validation::{deserialize_submission_data, SubmissionData};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFormRequest {
    /// Parsed by the handler so a malformed id reads as a missing form.
    #[serde(default)]
    pub form_id: String,
    #[serde(default, deserialize_with = "deserialize_submission_data")]
    pub data: SubmissionData,
    #[serde(default)]
    pub submitter_email: Option<String>,
    #[serde(default)]
    pub submitter_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFormResponse {
    pub submission_id: SubmissionId,
}
