//! HTTP handler for identity lifecycle deliveries.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::user::{
    HandleIdentityWebhookCommand, HandleIdentityWebhookHandler,
};
use crate::domain::user::{WebhookError, WebhookHeaders};

#[derive(Clone)]
pub struct WebhookHandlers {
    pub identity: Arc<HandleIdentityWebhookHandler>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// POST /api/webhooks/identity
pub async fn identity_webhook(
    State(handlers): State<WebhookHandlers>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, WebhookApiError> {
    let header = |name: &'static str| headers.get(name).and_then(|v| v.to_str().ok());
    let webhook_headers = WebhookHeaders::from_parts(
        header("svix-id"),
        header("svix-timestamp"),
        header("svix-signature"),
    )?;

    let outcome = handlers
        .identity
        .handle(HandleIdentityWebhookCommand {
            headers: webhook_headers,
            payload: body.to_vec(),
        })
        .await?;

    tracing::debug!(event = %outcome.event, synced = outcome.synced, "Identity webhook handled");
    Ok(Json(WebhookAck { received: true }))
}

/// Converts webhook failures to HTTP responses.
///
/// Signature and payload problems are the sender's fault and get a 400.
/// Store failures get a 500 so the provider redelivers.
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            WebhookError::MissingHeader(_) => (StatusCode::BAD_REQUEST, "MISSING_HEADER"),
            WebhookError::InvalidSignature | WebhookError::TimestampOutOfRange => {
                (StatusCode::BAD_REQUEST, "INVALID_SIGNATURE")
            }
            WebhookError::ParseError(_) => (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD"),
            WebhookError::InvalidSecret | WebhookError::Database(_) => {
                tracing::error!(error = %self.0, "Identity webhook failed");
                return ErrorResponse::internal().with_status(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

        tracing::warn!(error = %self.0, "Rejected identity webhook");
        ErrorResponse::new(code, self.0.to_string()).with_status(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_failures_are_bad_requests() {
        for err in [
            WebhookError::MissingHeader("svix-id"),
            WebhookError::InvalidSignature,
            WebhookError::TimestampOutOfRange,
            WebhookError::ParseError("eof".to_string()),
        ] {
            let response = WebhookApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn store_failure_is_retryable_500() {
        let response = WebhookApiError::from(WebhookError::Database("down".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
