//! HTTP handlers for submission endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{field_error, ErrorResponse, ValidationErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::submission::{
    BulkDeleteSubmissionsCommand, BulkUpdateSubmissionStatusCommand, DeleteSubmissionCommand,
    DeleteSubmissionHandler, GetSubmissionStatsHandler, GetSubmissionStatsQuery,
    ListSubmissionsHandler, ListSubmissionsQuery, UpdateSubmissionStatusCommand,
    UpdateSubmissionStatusHandler,
};
use crate::domain::foundation::{FormId, SubmissionId};
use crate::domain::submission::SubmissionError;

use super::dto::{
    BulkDeleteRequest, BulkResultResponse, BulkStatusRequest, ListSubmissionsParams,
    SubmissionListResponse, UpdateStatusRequest,
};

#[derive(Clone)]
pub struct SubmissionHandlers {
    pub list: Arc<ListSubmissionsHandler>,
    pub stats: Arc<GetSubmissionStatsHandler>,
    pub update_status: Arc<UpdateSubmissionStatusHandler>,
    pub delete: Arc<DeleteSubmissionHandler>,
}

/// GET /api/submissions - Submissions across the caller's forms
pub async fn list_submissions(
    State(handlers): State<SubmissionHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListSubmissionsParams>,
) -> Response {
    let form_id = match params.form_id.as_deref().map(str::parse::<FormId>).transpose() {
        Ok(form_id) => form_id,
        Err(_) => {
            return ErrorResponse::bad_request("Invalid formId").with_status(StatusCode::BAD_REQUEST)
        }
    };

    let query = ListSubmissionsQuery {
        owner_id: user.id,
        form_id,
    };

    match handlers.list.handle(query).await {
        Ok(submissions) => Json(SubmissionListResponse { submissions }).into_response(),
        Err(e) => submission_error_response(e),
    }
}

/// GET /api/submissions/stats
pub async fn submission_stats(
    State(handlers): State<SubmissionHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .stats
        .handle(GetSubmissionStatsQuery { owner_id: user.id })
        .await
    {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => submission_error_response(e),
    }
}

/// PATCH /api/submissions/:id/status
pub async fn update_submission_status(
    State(handlers): State<SubmissionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(submission_id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Response {
    let Ok(submission_id) = submission_id.parse::<SubmissionId>() else {
        return submission_not_found();
    };

    let cmd = UpdateSubmissionStatusCommand {
        submission_id,
        caller: user.id,
        status: req.status,
    };

    match handlers.update_status.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => submission_error_response(e),
    }
}

/// DELETE /api/submissions/:id
pub async fn delete_submission(
    State(handlers): State<SubmissionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(submission_id): Path<String>,
) -> Response {
    let Ok(submission_id) = submission_id.parse::<SubmissionId>() else {
        return submission_not_found();
    };

    let cmd = DeleteSubmissionCommand {
        submission_id,
        caller: user.id,
    };

    match handlers.delete.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => submission_error_response(e),
    }
}

/// POST /api/submissions/bulk/status
pub async fn bulk_update_status(
    State(handlers): State<SubmissionHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<BulkStatusRequest>,
) -> Response {
    let cmd = BulkUpdateSubmissionStatusCommand {
        submission_ids: req.submission_ids,
        caller: user.id,
        status: req.status,
    };

    match handlers.update_status.handle_bulk(cmd).await {
        Ok(processed) => Json(BulkResultResponse { processed }).into_response(),
        Err(e) => submission_error_response(e),
    }
}

/// POST /api/submissions/bulk/delete
pub async fn bulk_delete(
    State(handlers): State<SubmissionHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<BulkDeleteRequest>,
) -> Response {
    let cmd = BulkDeleteSubmissionsCommand {
        submission_ids: req.submission_ids,
        caller: user.id,
    };

    match handlers.delete.handle_bulk(cmd).await {
        Ok(processed) => Json(BulkResultResponse { processed }).into_response(),
        Err(e) => submission_error_response(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn submission_not_found() -> Response {
    ErrorResponse::not_found("Submission not found").with_status(StatusCode::NOT_FOUND)
}

pub fn submission_error_response(error: SubmissionError) -> Response {
    match error {
        SubmissionError::FormNotFound => {
            ErrorResponse::not_found(error.message()).with_status(StatusCode::NOT_FOUND)
        }
        SubmissionError::NotFound(_) => submission_not_found(),
        SubmissionError::Unauthorized => {
            ErrorResponse::unauthorized(error.message()).with_status(StatusCode::UNAUTHORIZED)
        }
        SubmissionError::Forbidden => {
            ErrorResponse::forbidden(error.message()).with_status(StatusCode::FORBIDDEN)
        }
        SubmissionError::Invalid(errors) => {
            ValidationErrorResponse::new("Submission failed validation", errors).into_response()
        }
        SubmissionError::ValidationFailed { field, message } => field_error(&field, &message),
        SubmissionError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Submission request failed");
            ErrorResponse::internal().with_status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
