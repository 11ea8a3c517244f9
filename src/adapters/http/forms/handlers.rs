//! HTTP handlers for form endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{field_error, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::form::{
    CreateFormCommand, CreateFormHandler, DeleteFormCommand, DeleteFormHandler,
    GenerateFormCommand, GenerateFormError, GenerateFormHandler, GetFormHandler, GetFormQuery,
    ListFormsHandler, ListFormsQuery, PublishFormCommand, PublishFormHandler,
    UnpublishFormCommand, UnpublishFormHandler, UpdateFormCommand, UpdateFormHandler,
};
use crate::domain::form::FormError;
use crate::domain::foundation::FormId;
use crate::ports::UpstreamError;

use super::dto::{
    CreateFormRequest, FormListResponse, FormResponse, GenerateFormRequest,
    GeneratedFormResponse, ListFormsParams, PublishFormRequest, UpdateFormRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct FormHandlers {
    pub create: Arc<CreateFormHandler>,
    pub update: Arc<UpdateFormHandler>,
    pub publish: Arc<PublishFormHandler>,
    pub unpublish: Arc<UnpublishFormHandler>,
    pub delete: Arc<DeleteFormHandler>,
    pub get: Arc<GetFormHandler>,
    pub list: Arc<ListFormsHandler>,
    pub generate: Arc<GenerateFormHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/forms - Create a draft
pub async fn create_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateFormRequest>,
) -> Response {
    let cmd = CreateFormCommand {
        owner_id: user.id,
        title: req.title,
        description: req.description,
        elements: req.elements,
    };

    match handlers.create.handle(cmd).await {
        Ok(form) => (StatusCode::CREATED, Json(FormResponse::from(&form))).into_response(),
        Err(e) => form_error_response(e),
    }
}

/// GET /api/forms - List the caller's forms
pub async fn list_forms(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListFormsParams>,
) -> Response {
    let cursor = match params.cursor.as_deref().map(str::parse::<FormId>).transpose() {
        Ok(cursor) => cursor,
        Err(_) => {
            return ErrorResponse::bad_request("Invalid cursor").with_status(StatusCode::BAD_REQUEST)
        }
    };

    let query = ListFormsQuery {
        owner_id: user.id,
        cursor,
        limit: params.limit,
    };

    match handlers.list.handle(query).await {
        Ok(page) => Json(FormListResponse::from(page)).into_response(),
        Err(e) => form_error_response(e),
    }
}

/// GET /api/forms/:id
pub async fn get_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
) -> Response {
    let Some(form_id) = parse_form_id(&form_id) else {
        return not_found();
    };

    let query = GetFormQuery {
        form_id,
        caller: user.id,
    };

    match handlers.get.handle(query).await {
        Ok(form) => Json(FormResponse::from(&form)).into_response(),
        Err(e) => form_error_response(e),
    }
}

/// PUT /api/forms/:id
pub async fn update_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
    Json(req): Json<UpdateFormRequest>,
) -> Response {
    let Some(form_id) = parse_form_id(&form_id) else {
        return not_found();
    };

    let cmd = UpdateFormCommand {
        form_id,
        caller: user.id,
        title: req.title,
        description: req.description,
        elements: req.elements,
    };

    match handlers.update.handle(cmd).await {
        Ok(form) => Json(FormResponse::from(&form)).into_response(),
        Err(e) => form_error_response(e),
    }
}

/// DELETE /api/forms/:id
pub async fn delete_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
) -> Response {
    let Some(form_id) = parse_form_id(&form_id) else {
        return not_found();
    };

    let cmd = DeleteFormCommand {
        form_id,
        caller: user.id,
    };

    match handlers.delete.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => form_error_response(e),
    }
}

/// POST /api/forms/:id/publish
pub async fn publish_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
    body: Option<Json<PublishFormRequest>>,
) -> Response {
    let Some(form_id) = parse_form_id(&form_id) else {
        return not_found();
    };

    let settings = body.map(|Json(req)| req).unwrap_or_default().into();
    let cmd = PublishFormCommand {
        form_id,
        caller: user.id,
        settings,
    };

    match handlers.publish.handle(cmd).await {
        Ok(form) => Json(FormResponse::from(&form)).into_response(),
        Err(e) => form_error_response(e),
    }
}

/// POST /api/forms/:id/unpublish
pub async fn unpublish_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
) -> Response {
    let Some(form_id) = parse_form_id(&form_id) else {
        return not_found();
    };

    let cmd = UnpublishFormCommand {
        form_id,
        caller: user.id,
    };

    match handlers.unpublish.handle(cmd).await {
        Ok(form) => Json(FormResponse::from(&form)).into_response(),
        Err(e) => form_error_response(e),
    }
}

/// POST /api/forms/generate - Draft a form from a prompt
pub async fn generate_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<GenerateFormRequest>,
) -> Response {
    tracing::debug!(user_id = %user.id, "Form generation requested");

    match handlers
        .generate
        .handle(GenerateFormCommand { prompt: req.prompt })
        .await
    {
        Ok(form) => Json(GeneratedFormResponse::from(form)).into_response(),
        Err(e) => generate_error_response(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_form_id(raw: &str) -> Option<FormId> {
    raw.parse().ok()
}

fn not_found() -> Response {
    ErrorResponse::not_found("Form not found").with_status(StatusCode::NOT_FOUND)
}

pub fn form_error_response(error: FormError) -> Response {
    match error {
        FormError::NotFound(_) => not_found(),
        FormError::Forbidden => {
            ErrorResponse::forbidden(error.message()).with_status(StatusCode::FORBIDDEN)
        }
        FormError::EmptyForm => ErrorResponse::new(error.code(), error.message())
            .with_status(StatusCode::UNPROCESSABLE_ENTITY),
        FormError::InvalidState(_) => {
            ErrorResponse::new(error.code(), error.message()).with_status(StatusCode::CONFLICT)
        }
        FormError::ValidationFailed { field, message } => field_error(&field, &message),
        FormError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Form request failed");
            ErrorResponse::internal().with_status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn generate_error_response(error: GenerateFormError) -> Response {
    let status = match &error {
        GenerateFormError::EmptyPrompt => StatusCode::BAD_REQUEST,
        GenerateFormError::Upstream(upstream) => match upstream {
            UpstreamError::QuotaExceeded(_) => StatusCode::PAYMENT_REQUIRED,
            UpstreamError::RateLimited { .. }
            | UpstreamError::Unavailable(_)
            | UpstreamError::Timeout { .. } => StatusCode::SERVICE_UNAVAILABLE,
            UpstreamError::AuthenticationFailed | UpstreamError::Malformed(_) => {
                StatusCode::BAD_GATEWAY
            }
        },
    };
    if let GenerateFormError::Upstream(upstream) = &error {
        tracing::warn!(error = %upstream, %status, "Form generation failed");
    }
    ErrorResponse::new(error.code(), error.message()).with_status(status)
}
