//! HTTP routes for user endpoints.

use axum::{
    routing::{delete, patch},
    Router,
};

use super::handlers::{delete_user, update_user_role, UserHandlers};

/// Mounted under `/api/users`. Every route is admin-only.
pub fn user_routes(handlers: UserHandlers) -> Router {
    Router::new()
        .route("/:id", delete(delete_user))
        .route("/:id/role", patch(update_user_role))
        .with_state(handlers)
}
