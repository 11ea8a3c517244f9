//! User and identity-webhook error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors from user operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    /// Caller is not an active admin.
    #[error("Not authorized")]
    Forbidden,

    #[error("Cannot delete yourself")]
    CannotDeleteSelf,

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl UserError {
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound => ErrorCode::UserNotFound,
            UserError::Forbidden => ErrorCode::Forbidden,
            UserError::CannotDeleteSelf => ErrorCode::ValidationFailed,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::UserNotFound => UserError::NotFound,
            _ => UserError::Infrastructure(err.to_string()),
        }
    }
}

/// Errors that occur while verifying or applying an identity webhook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// One of the signature headers is absent.
    #[error("Missing header: {0}")]
    MissingHeader(&'static str),

    /// No signature in the header matched.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Timestamp is outside the tolerance window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Signing secret is not in `whsec_<base64>` form.
    #[error("Invalid signing secret")]
    InvalidSecret,

    /// Header or payload could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Persisting the event's effect failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl WebhookError {
    /// Returns true if the provider should redeliver the event.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Database(_))
    }
}

impl From<DomainError> for WebhookError {
    fn from(err: DomainError) -> Self {
        WebhookError::Database(err.to_string())
    }
}
