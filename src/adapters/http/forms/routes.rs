//! HTTP routes for form endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_form, delete_form, generate_form, get_form, list_forms, publish_form, unpublish_form,
    update_form, FormHandlers,
};

/// Mounted under `/api/forms`.
pub fn form_routes(handlers: FormHandlers) -> Router {
    Router::new()
        .route("/", post(create_form).get(list_forms))
        .route("/generate", post(generate_form))
        .route("/:id", get(get_form).put(update_form).delete(delete_form))
        .route("/:id/publish", post(publish_form))
        .route("/:id/unpublish", post(unpublish_form))
        .with_state(handlers)
}
