//! Submission triage, analytics, and identity webhook flows through the router.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};

use formcraft::domain::foundation::UserId;
use formcraft::ports::UserRepository;

use common::{contact_form, TestApp, OWNER_TOKEN, STRANGER_TOKEN};

async fn submit(app: &TestApp, form_id: &str, name: &str) -> String {
    let (status, body) = app
        .call(
            Method::POST,
            "/api/public/submissions",
            None,
            Some(json!({"formId": form_id, "data": {"name": name}})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "submit failed: {}", body);
    body["submissionId"].as_str().unwrap().to_string()
}

async fn inbox(app: &TestApp) -> Vec<Value> {
    let (status, body) = app
        .call(Method::GET, "/api/submissions", Some(OWNER_TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    body["submissions"].as_array().unwrap().clone()
}

// ═══════════════════════════════════════════════════════════════════════════
// Inbox and triage
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn inbox_lists_submissions_with_form_name() {
    let app = TestApp::new();
    let form_id = app.publish_form(contact_form(), json!({})).await;
    submit(&app, &form_id, "Ada").await;

    let submissions = inbox(&app).await;

    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0]["formName"], "Contact");
    assert_eq!(submissions[0]["submitterName"], "Anonymous");
    assert_eq!(submissions[0]["status"], "new");
    assert_eq!(submissions[0]["data"]["name"], "Ada");
}

#[tokio::test]
async fn inbox_filters_by_form() {
    let app = TestApp::new();
    let first = app.publish_form(contact_form(), json!({})).await;
    let second = app.publish_form(contact_form(), json!({})).await;
    submit(&app, &first, "Ada").await;
    submit(&app, &second, "Grace").await;

    let (_, body) = app
        .call(
            Method::GET,
            &format!("/api/submissions?formId={}", second),
            Some(OWNER_TOKEN),
            None,
        )
        .await;

    let submissions = body["submissions"].as_array().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0]["data"]["name"], "Grace");
}

#[tokio::test]
async fn malformed_form_filter_is_a_bad_request() {
    let app = TestApp::new();
    let (status, _) = app
        .call(
            Method::GET,
            "/api/submissions?formId=not-a-uuid",
            Some(OWNER_TOKEN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn owner_triages_and_deletes_submission() {
    let app = TestApp::new();
    let form_id = app.publish_form(contact_form(), json!({})).await;
    let id = submit(&app, &form_id, "Ada").await;

    let (status, _) = app
        .call(
            Method::PATCH,
            &format!("/api/submissions/{}/status", id),
            Some(OWNER_TOKEN),
            Some(json!({"status": "reviewed"})),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(inbox(&app).await[0]["status"], "reviewed");

    let (status, _) = app
        .call(
            Method::DELETE,
            &format!("/api/submissions/{}", id),
            Some(OWNER_TOKEN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(inbox(&app).await.is_empty());
}

#[tokio::test]
async fn stranger_cannot_triage_submission() {
    let app = TestApp::new();
    let form_id = app.publish_form(contact_form(), json!({})).await;
    let id = submit(&app, &form_id, "Ada").await;

    let (status, _) = app
        .call(
            Method::PATCH,
            &format!("/api/submissions/{}/status", id),
            Some(STRANGER_TOKEN),
            Some(json!({"status": "archived"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .call(
            Method::DELETE,
            &format!("/api/submissions/{}", id),
            Some(STRANGER_TOKEN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(inbox(&app).await[0]["status"], "new");
}

#[tokio::test]
async fn bulk_operations_skip_foreign_ids() {
    let app = TestApp::new();
    let form_id = app.publish_form(contact_form(), json!({})).await;
    let a = submit(&app, &form_id, "Ada").await;
    let b = submit(&app, &form_id, "Grace").await;
    let missing = formcraft::domain::foundation::SubmissionId::new().to_string();

    let (status, body) = app
        .call(
            Method::POST,
            "/api/submissions/bulk/status",
            Some(OWNER_TOKEN),
            Some(json!({"submissionIds": [a, b, missing], "status": "archived"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed"], 2);
    assert!(inbox(&app)
        .await
        .iter()
        .all(|s| s["status"] == "archived"));

    let (_, body) = app
        .call(
            Method::POST,
            "/api/submissions/bulk/delete",
            Some(STRANGER_TOKEN),
            Some(json!({"submissionIds": [a]})),
        )
        .await;
    assert_eq!(body["processed"], 0);

    let (_, body) = app
        .call(
            Method::POST,
            "/api/submissions/bulk/delete",
            Some(OWNER_TOKEN),
            Some(json!({"submissionIds": [a, b]})),
        )
        .await;
    assert_eq!(body["processed"], 2);
    assert!(inbox(&app).await.is_empty());
}

#[tokio::test]
async fn submissions_survive_form_deletion_but_leave_the_inbox() {
    let app = TestApp::new();
    let form_id = app.publish_form(contact_form(), json!({})).await;
    submit(&app, &form_id, "Ada").await;

    app.call(
        Method::DELETE,
        &format!("/api/forms/{}", form_id),
        Some(OWNER_TOKEN),
        None,
    )
    .await;

    assert!(inbox(&app).await.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Analytics
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn stats_count_forms_and_statuses() {
    let app = TestApp::new();
    let busy = app.publish_form(contact_form(), json!({})).await;
    app.create_form(contact_form()).await;
    let id = submit(&app, &busy, "Ada").await;
    submit(&app, &busy, "Grace").await;
    app.call(
        Method::PATCH,
        &format!("/api/submissions/{}/status", id),
        Some(OWNER_TOKEN),
        Some(json!({"status": "reviewed"})),
    )
    .await;

    let (status, stats) = app
        .call(Method::GET, "/api/submissions/stats", Some(OWNER_TOKEN), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalForms"], 2);
    assert_eq!(stats["publishedForms"], 1);
    assert_eq!(stats["totalSubmissions"], 2);
    assert_eq!(stats["byStatus"], json!({"new": 1, "reviewed": 1, "archived": 0}));
    assert_eq!(stats["perForm"][0]["formId"], busy.as_str());
    assert_eq!(stats["perForm"][0]["submissions"], 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// Identity webhook
// ═══════════════════════════════════════════════════════════════════════════

fn webhook_request(app: &TestApp, body: &str, timestamp: i64) -> Request<Body> {
    let signature = app.verifier.sign("msg_1", timestamp, body.as_bytes()).unwrap();
    Request::builder()
        .method(Method::POST)
        .uri("/api/webhooks/identity")
        .header(header::CONTENT_TYPE, "application/json")
        .header("svix-id", "msg_1")
        .header("svix-timestamp", timestamp.to_string())
        .header("svix-signature", signature)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

const USER_CREATED: &str = r#"{"type":"user.created","data":{"id":"user_ada","first_name":"Ada","last_name":"Lovelace","email_addresses":[{"email_address":"ada@example.com"}]}}"#;

#[tokio::test]
async fn signed_user_created_event_upserts_user() {
    let app = TestApp::new();

    let (status, body) = app.send(webhook_request(&app, USER_CREATED, now())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"received": true}));
    let user = app
        .users
        .find_by_id(&UserId::new("user_ada").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.name(), "Ada Lovelace");
    assert_eq!(user.email(), Some("ada@example.com"));
}

#[tokio::test]
async fn user_deleted_event_soft_deletes() {
    let app = TestApp::new();
    app.send(webhook_request(&app, USER_CREATED, now())).await;

    let deleted = r#"{"type":"user.deleted","data":{"id":"user_ada"}}"#;
    let (status, _) = app.send(webhook_request(&app, deleted, now())).await;

    assert_eq!(status, StatusCode::OK);
    let user = app
        .users
        .find_by_id(&UserId::new("user_ada").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(user.is_deleted());
}

#[tokio::test]
async fn tampered_body_is_rejected() {
    let app = TestApp::new();
    let mut request = webhook_request(&app, USER_CREATED, now());
    *request.body_mut() = Body::from(USER_CREATED.replace("Ada", "Eve"));

    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let stored = app
        .users
        .find_by_id(&UserId::new("user_ada").unwrap())
        .await
        .unwrap();
    assert!(stored.is_none());
}

#[tokio::test]
async fn stale_delivery_is_rejected() {
    let app = TestApp::new();
    let (status, _) = app
        .send(webhook_request(&app, USER_CREATED, now() - 3600))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unsigned_delivery_is_rejected() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/webhooks/identity")
        .body(Body::from(USER_CREATED))
        .unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_HEADER");
}
