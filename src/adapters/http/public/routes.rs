//! HTTP routes for public endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_public_form, submit_form, PublicHandlers};

/// Mounted under `/api/public`.
pub fn public_routes(handlers: PublicHandlers) -> Router {
    Router::new()
        .route("/forms/:id", get(get_public_form))
        .route("/submissions", post(submit_form))
        .with_state(handlers)
}
