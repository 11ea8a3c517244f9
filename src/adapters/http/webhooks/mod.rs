//! HTTP adapter for the signed identity-provider webhook.

mod handlers;
mod routes;

pub use handlers::{WebhookAck, WebhookApiError, WebhookHandlers};
pub use routes::webhook_routes;
