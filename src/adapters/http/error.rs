//! Error response body shared by every HTTP module.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::validation::ValidationErrors;

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    /// The message is generic; callers log the cause.
    pub fn internal() -> Self {
        Self::new("INTERNAL_ERROR", "Internal server error")
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// 422 body for submissions that failed validation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub code: &'static str,
    pub message: String,
    /// Element id to first failing message.
    pub errors: ValidationErrors,
}

impl ValidationErrorResponse {
    pub fn new(message: impl Into<String>, errors: ValidationErrors) -> Self {
        Self {
            code: "VALIDATION_FAILED",
            message: message.into(),
            errors,
        }
    }
}

impl IntoResponse for ValidationErrorResponse {
    fn into_response(self) -> Response {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self)).into_response()
    }
}

/// 422 for a single-field failure, reported in the same `errors` shape.
pub fn field_error(field: &str, message: &str) -> Response {
    ErrorResponse::new("VALIDATION_FAILED", format!("Validation failed for '{}'", field))
        .with_details(serde_json::json!({ "errors": { field: message } }))
        .with_status(StatusCode::UNPROCESSABLE_ENTITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_are_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::not_found("Form not found")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn internal_error_hides_cause() {
        let err = ErrorResponse::internal();
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn field_error_is_unprocessable() {
        let response = field_error("title", "Title is required");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
