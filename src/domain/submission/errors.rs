//! Submission-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SubmissionId};
use crate::domain::validation::{SubmissionRejection, ValidationErrors};

/// Submission-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The referenced form does not exist or is not published.
    FormNotFound,
    /// Submission was not found.
    NotFound(SubmissionId),
    /// Anonymous caller on a form that requires sign-in.
    Unauthorized,
    /// Caller does not own the parent form.
    Forbidden,
    /// Submitted values failed validation.
    Invalid(ValidationErrors),
    /// Request was malformed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl SubmissionError {
    pub fn not_found(id: SubmissionId) -> Self {
        SubmissionError::NotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SubmissionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SubmissionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SubmissionError::FormNotFound => ErrorCode::FormNotFound,
            SubmissionError::NotFound(_) => ErrorCode::SubmissionNotFound,
            SubmissionError::Unauthorized => ErrorCode::Unauthorized,
            SubmissionError::Forbidden => ErrorCode::Forbidden,
            SubmissionError::Invalid(_) | SubmissionError::ValidationFailed { .. } => {
                ErrorCode::ValidationFailed
            }
            SubmissionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SubmissionError::FormNotFound => "Form not found".to_string(),
            SubmissionError::NotFound(_) => "Submission not found".to_string(),
            SubmissionError::Unauthorized => "Sign in required to submit this form".to_string(),
            SubmissionError::Forbidden => "Not authorized".to_string(),
            SubmissionError::Invalid(_) => "Submission failed validation".to_string(),
            SubmissionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SubmissionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SubmissionError {}

impl From<SubmissionRejection> for SubmissionError {
    fn from(rejection: SubmissionRejection) -> Self {
        match rejection {
            SubmissionRejection::NotFound => SubmissionError::FormNotFound,
            SubmissionRejection::Unauthorized => SubmissionError::Unauthorized,
            SubmissionRejection::Invalid(errors) => SubmissionError::Invalid(errors),
        }
    }
}

impl From<DomainError> for SubmissionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => SubmissionError::Forbidden,
            ErrorCode::FormNotFound => SubmissionError::FormNotFound,
            ErrorCode::ValidationFailed => SubmissionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SubmissionError::Infrastructure(err.to_string()),
        }
    }
}
