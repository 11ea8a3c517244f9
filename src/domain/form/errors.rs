//! Form-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, FormId};

/// Form-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Form was not found, or is not visible to the caller.
    NotFound(FormId),
    /// Caller is not the owner.
    Forbidden,
    /// Publishing a form with no elements.
    EmptyForm,
    /// Transition not allowed from the current status.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl FormError {
    pub fn not_found(id: FormId) -> Self {
        FormError::NotFound(id)
    }
    pub fn forbidden() -> Self {
        FormError::Forbidden
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        FormError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        FormError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            FormError::NotFound(_) => ErrorCode::FormNotFound,
            FormError::Forbidden => ErrorCode::Forbidden,
            FormError::EmptyForm => ErrorCode::EmptyForm,
            FormError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            FormError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            FormError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    /// User-facing message. Never reveals whether a hidden form exists.
    pub fn message(&self) -> String {
        match self {
            FormError::NotFound(_) => "Form not found".to_string(),
            FormError::Forbidden => "Not authorized".to_string(),
            FormError::EmptyForm => "Cannot publish a form without elements".to_string(),
            FormError::InvalidState(msg) => format!("Invalid state: {}", msg),
            FormError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            FormError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FormError {}

impl From<DomainError> for FormError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => FormError::Forbidden,
            ErrorCode::EmptyForm => FormError::EmptyForm,
            ErrorCode::InvalidStateTransition => FormError::InvalidState(err.message),
            ErrorCode::ValidationFailed => FormError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => FormError::Infrastructure(err.to_string()),
        }
    }
}
