//! HTTP routes for submission endpoints.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{
    bulk_delete, bulk_update_status, delete_submission, list_submissions, submission_stats,
    update_submission_status, SubmissionHandlers,
};

/// Mounted under `/api/submissions`.
pub fn submission_routes(handlers: SubmissionHandlers) -> Router {
    Router::new()
        .route("/", get(list_submissions))
        .route("/stats", get(submission_stats))
        .route("/bulk/status", post(bulk_update_status))
        .route("/bulk/delete", post(bulk_delete))
        .route("/:id", delete(delete_submission))
        .route("/:id/status", patch(update_submission_status))
        .with_state(handlers)
}
