//! Shared router harness for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use formcraft::adapters::ai::MockFormGenerator;
use formcraft::adapters::auth::MockSessionValidator;
use formcraft::adapters::http::{build_router, AppState, RouterOptions};
use formcraft::adapters::memory::{
    InMemoryFormRepository, InMemorySubmissionRepository, InMemoryUserRepository,
};
use formcraft::domain::foundation::UserId;
use formcraft::domain::user::{UserRole, WebhookVerifier};
use formcraft::ports::UserRepository;

pub const OWNER_TOKEN: &str = "owner-token";
pub const OWNER_ID: &str = "user_owner";
pub const STRANGER_TOKEN: &str = "stranger-token";
pub const STRANGER_ID: &str = "user_stranger";
pub const WEBHOOK_SECRET: &str = "whsec_Zm9ybWNyYWZ0LWludGVncmF0aW9uLWtleQ==";
pub const PUBLIC_BASE_URL: &str = "https://forms.test";

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepository>,
    pub generator: MockFormGenerator,
    pub verifier: WebhookVerifier,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_generator(MockFormGenerator::new())
    }

    pub fn with_generator(generator: MockFormGenerator) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let verifier = WebhookVerifier::new(WEBHOOK_SECRET).unwrap();
        let validator = MockSessionValidator::new()
            .with_test_user(OWNER_TOKEN, OWNER_ID)
            .with_test_user(STRANGER_TOKEN, STRANGER_ID);

        let state = AppState {
            form_repository: Arc::new(InMemoryFormRepository::new()),
            submission_repository: Arc::new(InMemorySubmissionRepository::new()),
            user_repository: users.clone(),
            session_validator: Arc::new(validator),
            form_generator: Arc::new(generator.clone()),
            webhook_verifier: verifier.clone(),
            public_base_url: PUBLIC_BASE_URL.to_string(),
        };

        Self {
            router: build_router(state, RouterOptions::default()),
            users,
            generator,
            verifier,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    /// Signs `token` in once so its record exists, then grants it the admin role.
    pub async fn promote_to_admin(&self, token: &str, user_id: &str) {
        let (status, _) = self.call(Method::GET, "/api/forms", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);

        let id = UserId::new(user_id).unwrap();
        let mut user = self.users.find_by_id(&id).await.unwrap().unwrap();
        user.set_role(UserRole::Admin);
        self.users.upsert(&user).await.unwrap();
    }

    /// Creates a draft owned by [`OWNER_ID`] and returns its id.
    pub async fn create_form(&self, body: Value) -> String {
        let (status, form) = self
            .call(Method::POST, "/api/forms", Some(OWNER_TOKEN), Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", form);
        form["id"].as_str().unwrap().to_string()
    }

    /// Creates and publishes a form, returning its id.
    pub async fn publish_form(&self, body: Value, settings: Value) -> String {
        let id = self.create_form(body).await;
        let (status, form) = self
            .call(
                Method::POST,
                &format!("/api/forms/{}/publish", id),
                Some(OWNER_TOKEN),
                Some(settings),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "publish failed: {}", form);
        id
    }
}

pub fn contact_form() -> Value {
    serde_json::json!({
        "title": "Contact",
        "description": "Reach the team",
        "elements": [
            {"id": "name", "type": "text", "label": "Name", "required": true},
            {"id": "topic", "type": "select", "label": "Topic", "options": ["Sales", "Support"]},
            {"id": "message", "type": "textarea", "label": "Message",
             "validation": {"maxLength": 20}}
        ]
    })
}
