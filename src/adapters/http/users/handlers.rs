//! HTTP handlers for user endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::user::{
    DeleteUserCommand, DeleteUserHandler, UpdateUserRoleCommand, UpdateUserRoleHandler,
};
use crate::domain::foundation::UserId;
use crate::domain::user::UserError;

use super::dto::UpdateRoleRequest;

#[derive(Clone)]
pub struct UserHandlers {
    pub update_role: Arc<UpdateUserRoleHandler>,
    pub delete: Arc<DeleteUserHandler>,
}

/// PATCH /api/users/:id/role
pub async fn update_user_role(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
    Path(target): Path<String>,
    Json(req): Json<UpdateRoleRequest>,
) -> Response {
    let Ok(target) = UserId::new(target) else {
        return user_error_response(UserError::NotFound);
    };

    let cmd = UpdateUserRoleCommand {
        caller: user.id,
        target,
        role: req.role,
    };

    match handlers.update_role.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => user_error_response(e),
    }
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
    Path(target): Path<String>,
) -> Response {
    let Ok(target) = UserId::new(target) else {
        return user_error_response(UserError::NotFound);
    };

    let cmd = DeleteUserCommand {
        caller: user.id,
        target,
    };

    match handlers.delete.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => user_error_response(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

pub fn user_error_response(error: UserError) -> Response {
    match error {
        UserError::NotFound => {
            ErrorResponse::not_found(error.to_string()).with_status(StatusCode::NOT_FOUND)
        }
        UserError::Forbidden => {
            ErrorResponse::forbidden(error.to_string()).with_status(StatusCode::FORBIDDEN)
        }
        UserError::CannotDeleteSelf => {
            ErrorResponse::bad_request(error.to_string()).with_status(StatusCode::BAD_REQUEST)
        }
        UserError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "User request failed");
            ErrorResponse::internal().with_status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
