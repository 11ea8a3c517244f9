//! HTTP adapters - REST API over axum.
//!
//! Each area has its own `dto`/`handlers`/`routes` triple. [`build_router`]
//! wires every handler from an [`AppState`] and applies the shared layers.
//!
//! ```text
//! /health                 liveness, no auth
//! /api/webhooks/*         signature-verified, no bearer auth
//! /api/forms/*            auth required
//! /api/submissions/*      auth required
//! /api/users/*            auth required, admin only
//! /api/public/*           auth optional
//! ```

pub mod error;
pub mod forms;
pub mod middleware;
pub mod public;
pub mod submissions;
pub mod users;
pub mod webhooks;

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, routing::get, Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::handlers::form::{
    CreateFormHandler, DeleteFormHandler, GenerateFormHandler, GetFormHandler,
    GetPublishedFormHandler, ListFormsHandler, PublishFormHandler, UnpublishFormHandler,
    UpdateFormHandler,
};
use crate::application::handlers::submission::{
    DeleteSubmissionHandler, GetSubmissionStatsHandler, ListSubmissionsHandler,
    SubmitFormHandler, UpdateSubmissionStatusHandler,
};
use crate::application::handlers::user::{
    DeleteUserHandler, EnsureUserHandler, HandleIdentityWebhookHandler, UpdateUserRoleHandler,
};
use crate::domain::user::WebhookVerifier;
use crate::ports::{
    FormGenerator, FormRepository, SessionValidator, SubmissionRepository, UserRepository,
};

pub use error::ErrorResponse;
pub use forms::{form_routes, FormHandlers};
pub use middleware::{auth_middleware, AuthState};
pub use public::{public_routes, PublicHandlers};
pub use submissions::{submission_routes, SubmissionHandlers};
pub use users::{user_routes, UserHandlers};
pub use webhooks::{webhook_routes, WebhookHandlers};

/// Every external dependency the HTTP surface needs, constructed by the caller.
#[derive(Clone)]
pub struct AppState {
    pub form_repository: Arc<dyn FormRepository>,
    pub submission_repository: Arc<dyn SubmissionRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub form_generator: Arc<dyn FormGenerator>,
    pub webhook_verifier: WebhookVerifier,
    /// Origin used to derive share URLs and embed snippets.
    pub public_base_url: String,
}

/// Cross-cutting layer settings.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Empty allows any origin.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl AppState {
    fn form_handlers(&self) -> FormHandlers {
        let repo = &self.form_repository;
        FormHandlers {
            create: Arc::new(CreateFormHandler::new(repo.clone())),
            update: Arc::new(UpdateFormHandler::new(repo.clone())),
            publish: Arc::new(PublishFormHandler::new(
                repo.clone(),
                self.public_base_url.clone(),
            )),
            unpublish: Arc::new(UnpublishFormHandler::new(repo.clone())),
            delete: Arc::new(DeleteFormHandler::new(repo.clone())),
            get: Arc::new(GetFormHandler::new(repo.clone())),
            list: Arc::new(ListFormsHandler::new(repo.clone())),
            generate: Arc::new(GenerateFormHandler::new(self.form_generator.clone())),
        }
    }

    fn submission_handlers(&self) -> SubmissionHandlers {
        let forms = &self.form_repository;
        let submissions = &self.submission_repository;
        SubmissionHandlers {
            list: Arc::new(ListSubmissionsHandler::new(forms.clone(), submissions.clone())),
            stats: Arc::new(GetSubmissionStatsHandler::new(
                forms.clone(),
                submissions.clone(),
            )),
            update_status: Arc::new(UpdateSubmissionStatusHandler::new(
                forms.clone(),
                submissions.clone(),
            )),
            delete: Arc::new(DeleteSubmissionHandler::new(
                forms.clone(),
                submissions.clone(),
            )),
        }
    }

    fn public_handlers(&self) -> PublicHandlers {
        PublicHandlers {
            get_published: Arc::new(GetPublishedFormHandler::new(self.form_repository.clone())),
            submit: Arc::new(SubmitFormHandler::new(
                self.form_repository.clone(),
                self.submission_repository.clone(),
            )),
        }
    }

    fn user_handlers(&self) -> UserHandlers {
        UserHandlers {
            update_role: Arc::new(UpdateUserRoleHandler::new(self.user_repository.clone())),
            delete: Arc::new(DeleteUserHandler::new(self.user_repository.clone())),
        }
    }

    fn webhook_handlers(&self) -> WebhookHandlers {
        WebhookHandlers {
            identity: Arc::new(HandleIdentityWebhookHandler::new(
                self.webhook_verifier.clone(),
                self.user_repository.clone(),
            )),
        }
    }

    fn auth_state(&self) -> AuthState {
        AuthState::new(
            self.session_validator.clone(),
            Arc::new(EnsureUserHandler::new(self.user_repository.clone())),
        )
    }
}

/// Builds the full application router.
pub fn build_router(state: AppState, options: RouterOptions) -> Router {
    let api = Router::new()
        .nest("/forms", form_routes(state.form_handlers()))
        .nest("/submissions", submission_routes(state.submission_handlers()))
        .nest("/users", user_routes(state.user_handlers()))
        .nest("/public", public_routes(state.public_handlers()))
        .layer(axum::middleware::from_fn_with_state(
            state.auth_state(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api/webhooks", webhook_routes(state.webhook_handlers()))
        .nest("/api", api)
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}
