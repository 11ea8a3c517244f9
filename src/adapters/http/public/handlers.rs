//! HTTP handlers for public endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::forms::{form_error_response, PublicFormResponse};
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::submissions::submission_error_response;
use crate::application::handlers::form::{GetPublishedFormHandler, GetPublishedFormQuery};
use crate::application::handlers::submission::{SubmitFormCommand, SubmitFormHandler};
use crate::domain::form::FormError;
use crate::domain::foundation::FormId;
use crate::domain::submission::{ClientInfo, SubmissionError, SubmissionInput};

use super::dto::{SubmitFormRequest, SubmitFormResponse};

#[derive(Clone)]
pub struct PublicHandlers {
    pub get_published: Arc<GetPublishedFormHandler>,
    pub submit: Arc<SubmitFormHandler>,
}

/// GET /api/public/forms/:id - Published form or 404
pub async fn get_public_form(
    State(handlers): State<PublicHandlers>,
    Path(form_id): Path<String>,
) -> Response {
    let Ok(form_id) = form_id.parse::<FormId>() else {
        return form_error_response(FormError::NotFound(FormId::new()));
    };

    match handlers
        .get_published
        .handle(GetPublishedFormQuery { form_id })
        .await
    {
        Ok(form) => Json(PublicFormResponse::from(&form)).into_response(),
        Err(e) => form_error_response(e),
    }
}

/// POST /api/public/submissions
pub async fn submit_form(
    State(handlers): State<PublicHandlers>,
    OptionalAuth(caller): OptionalAuth,
    headers: HeaderMap,
    Json(req): Json<SubmitFormRequest>,
) -> Response {
    let Ok(form_id) = req.form_id.parse::<FormId>() else {
        return submission_error_response(SubmissionError::FormNotFound);
    };

    let cmd = SubmitFormCommand {
        form_id,
        input: SubmissionInput {
            data: req.data,
            submitter_email: req.submitter_email,
            submitter_name: req.submitter_name,
            client: client_info(&headers),
        },
        caller,
    };

    match handlers.submit.handle(cmd).await {
        Ok(submission) => (
            StatusCode::CREATED,
            Json(SubmitFormResponse {
                submission_id: *submission.id(),
            }),
        )
            .into_response(),
        Err(e) => submission_error_response(e),
    }
}

/// First hop of `X-Forwarded-For`, then `X-Real-IP`.
fn client_info(headers: &HeaderMap) -> ClientInfo {
    let ip_address = header_str(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .or_else(|| header_str(headers, "x-real-ip"))
        .map(str::to_string);

    ClientInfo {
        ip_address,
        user_agent: header_str(headers, "user-agent").map(str::to_string),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
