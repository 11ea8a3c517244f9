//! Request and response bodies for submission endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::submission::SubmissionView;
use crate::domain::foundation::SubmissionId;
use crate::domain::submission::SubmissionStatus;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubmissionsParams {
    pub form_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: SubmissionStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusRequest {
    pub submission_ids: Vec<SubmissionId>,
    pub status: SubmissionStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    pub submission_ids: Vec<SubmissionId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionListResponse {
    pub submissions: Vec<SubmissionView>,
}

/// Number of ids acted on. Missing or foreign ids are not counted.
#[derive(Debug, Clone, Serialize)]
pub struct BulkResultResponse {
    pub processed: usize,
}
