//! HTTP routes for webhooks.

use axum::{routing::post, Router};

use super::handlers::{identity_webhook, WebhookHandlers};

/// Mounted under `/api/webhooks`. Not behind the auth middleware.
pub fn webhook_routes(handlers: WebhookHandlers) -> Router {
    Router::new()
        .route("/identity", post(identity_webhook))
        .with_state(handlers)
}
