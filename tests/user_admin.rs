//! Router-level tests for admin user management.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use formcraft::domain::foundation::UserId;
use formcraft::domain::user::UserRole;
use formcraft::ports::UserRepository;

use common::{TestApp, OWNER_ID, OWNER_TOKEN, STRANGER_ID, STRANGER_TOKEN};

/// Owner is an admin; the stranger is a regular member with a record.
async fn admin_app() -> TestApp {
    let app = TestApp::new();
    app.promote_to_admin(OWNER_TOKEN, OWNER_ID).await;
    let (status, _) = app
        .call(Method::GET, "/api/forms", Some(STRANGER_TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    app
}

async fn role_of(app: &TestApp, id: &str) -> Option<UserRole> {
    app.users
        .find_by_id(&UserId::new(id).unwrap())
        .await
        .unwrap()
        .map(|u| u.role())
}

// ═══════════════════════════════════════════════════════════════════════════
// Role changes
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn admin_grants_admin_role() {
    let app = admin_app().await;

    let (status, _) = app
        .call(
            Method::PATCH,
            &format!("/api/users/{}/role", STRANGER_ID),
            Some(OWNER_TOKEN),
            Some(json!({"role": "admin"})),
        )
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(role_of(&app, STRANGER_ID).await, Some(UserRole::Admin));
}

#[tokio::test]
async fn member_cannot_change_roles() {
    let app = admin_app().await;

    let (status, body) = app
        .call(
            Method::PATCH,
            &format!("/api/users/{}/role", OWNER_ID),
            Some(STRANGER_TOKEN),
            Some(json!({"role": "user"})),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized");
    assert_eq!(role_of(&app, OWNER_ID).await, Some(UserRole::Admin));
}

#[tokio::test]
async fn role_change_for_unknown_user_is_not_found() {
    let app = admin_app().await;

    let (status, body) = app
        .call(
            Method::PATCH,
            "/api/users/user_ghost/role",
            Some(OWNER_TOKEN),
            Some(json!({"role": "admin"})),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

// ═══════════════════════════════════════════════════════════════════════════
// Deletion
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn admin_deletes_member() {
    let app = admin_app().await;

    let (status, _) = app
        .call(
            Method::DELETE,
            &format!("/api/users/{}", STRANGER_ID),
            Some(OWNER_TOKEN),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(role_of(&app, STRANGER_ID).await, None);
}

#[tokio::test]
async fn admin_cannot_delete_self() {
    let app = admin_app().await;

    let (status, body) = app
        .call(
            Method::DELETE,
            &format!("/api/users/{}", OWNER_ID),
            Some(OWNER_TOKEN),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot delete yourself");
    assert!(role_of(&app, OWNER_ID).await.is_some());
}

#[tokio::test]
async fn member_cannot_delete_users() {
    let app = admin_app().await;

    let (status, _) = app
        .call(
            Method::DELETE,
            &format!("/api/users/{}", OWNER_ID),
            Some(STRANGER_TOKEN),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(role_of(&app, OWNER_ID).await.is_some());
}

#[tokio::test]
async fn user_routes_require_a_token() {
    let app = admin_app().await;

    let (status, _) = app
        .call(Method::DELETE, &format!("/api/users/{}", STRANGER_ID), None, None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
