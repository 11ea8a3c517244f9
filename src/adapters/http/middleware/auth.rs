//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Validates Bearer tokens, provisions the user record and
//!   injects the identity into extensions
//! - `RequireAuth` - Extractor that requires authentication
//! - `OptionalAuth` - Extractor for optional authentication
//!
//! ```text
//! Request → auth_middleware → SessionValidator → EnsureUserHandler
//!                                      ↓
//!                              Handler → RequireAuth reads AuthenticatedUser
//! ```
//!
//! Requests without a token pass through untouched so that public routes can
//! serve anonymous callers. A token that fails validation is always a 401.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::user::{EnsureUserCommand, EnsureUserHandler};
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state.
#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<dyn SessionValidator>,
    pub ensure_user: Arc<EnsureUserHandler>,
}

impl AuthState {
    pub fn new(validator: Arc<dyn SessionValidator>, ensure_user: Arc<EnsureUserHandler>) -> Self {
        Self {
            validator,
            ensure_user,
        }
    }
}

/// Reads `Authorization: Bearer <token>`.
fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

/// Authentication middleware.
///
/// 1. Extracts the Bearer token, if any
/// 2. Validates it with the `SessionValidator` port
/// 3. Gets or creates the user record for the identity
/// 4. Injects `AuthenticatedUser` into request extensions
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&request) else {
        return next.run(request).await;
    };

    let user = match auth.validator.validate(&token).await {
        Ok(user) => user,
        Err(e) => return auth_error_response(&e),
    };

    if let Err(e) = auth
        .ensure_user
        .handle(EnsureUserCommand {
            identity: user.clone(),
        })
        .await
    {
        tracing::error!(user_id = %user.id, error = %e, "Failed to provision user");
        return ErrorResponse::internal().with_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    request.extensions_mut().insert(user);
    next.run(request).await
}

fn auth_error_response(error: &AuthError) -> Response {
    let (status, message) = match error {
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!(reason = %msg, "Auth service unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Authentication service unavailable",
            )
        }
    };
    ErrorResponse::new("AUTH_ERROR", message).with_status(status)
}

/// Requires an identity injected by `auth_middleware`; 401 otherwise.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// `None` for anonymous callers.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => {
                ErrorResponse::new("UNAUTHENTICATED", "Authentication required")
                    .with_status(StatusCode::UNAUTHORIZED)
            }
        }
    }
}
