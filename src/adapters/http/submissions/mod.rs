//! HTTP adapter for the owner's submission inbox.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    BulkDeleteRequest, BulkResultResponse, BulkStatusRequest, ListSubmissionsParams,
    SubmissionListResponse, UpdateStatusRequest,
};
pub use handlers::{submission_error_response, SubmissionHandlers};
pub use routes::submission_routes;
