//! Router-level tests for form authoring and the public submission path.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use formcraft::domain::foundation::UserId;
use formcraft::ports::UserRepository;

use common::{contact_form, TestApp, OWNER_ID, OWNER_TOKEN, PUBLIC_BASE_URL, STRANGER_TOKEN};

// ═══════════════════════════════════════════════════════════════════════════
// Health and auth
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn health_needs_no_auth() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn owner_routes_reject_missing_token() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/api/forms", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn unknown_token_is_rejected_even_on_public_routes() {
    let app = TestApp::new();
    let id = app.publish_form(contact_form(), json!({})).await;

    let (status, body) = app
        .call(
            Method::GET,
            &format!("/api/public/forms/{}", id),
            Some("bogus"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH_ERROR");
}

#[tokio::test]
async fn first_authenticated_request_creates_user_record() {
    let app = TestApp::new();
    let id = UserId::new(OWNER_ID).unwrap();

    app.call(Method::GET, "/api/forms", Some(OWNER_TOKEN), None)
        .await;

    let user = app.users.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(user.token_identifier(), "clerk_user_owner");
}

// ═══════════════════════════════════════════════════════════════════════════
// Authoring
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn created_form_is_a_listed_draft() {
    let app = TestApp::new();
    let id = app.create_form(contact_form()).await;

    let (status, body) = app
        .call(Method::GET, "/api/forms", Some(OWNER_TOKEN), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isDone"], true);
    let forms = body["forms"].as_array().unwrap();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0]["id"], id.as_str());
    assert_eq!(forms[0]["status"], "draft");
    assert_eq!(forms[0]["elements"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn select_without_options_is_rejected() {
    let app = TestApp::new();
    let (status, _) = app
        .call(
            Method::POST,
            "/api/forms",
            Some(OWNER_TOKEN),
            Some(json!({
                "title": "Broken",
                "elements": [{"id": "pick", "type": "select", "label": "Pick"}]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn forms_are_private_to_their_owner() {
    let app = TestApp::new();
    let id = app.create_form(contact_form()).await;
    let path = format!("/api/forms/{}", id);

    let (status, _) = app.call(Method::GET, &path, Some(STRANGER_TOKEN), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .call(Method::PUT, &path, Some(STRANGER_TOKEN), Some(contact_form()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized");

    let (_, listed) = app
        .call(Method::GET, "/api/forms", Some(STRANGER_TOKEN), None)
        .await;
    assert!(listed["forms"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn publish_sets_share_links_and_unpublish_hides_form() {
    let app = TestApp::new();
    let id = app.publish_form(contact_form(), json!({})).await;

    let (_, form) = app
        .call(Method::GET, &format!("/api/forms/{}", id), Some(OWNER_TOKEN), None)
        .await;
    assert_eq!(form["status"], "published");
    assert!(form["shareUrl"]
        .as_str()
        .unwrap()
        .starts_with(PUBLIC_BASE_URL));
    assert!(form["embedCode"].as_str().unwrap().contains("<iframe"));

    let (status, _) = app
        .call(
            Method::POST,
            &format!("/api/forms/{}/unpublish", id),
            Some(OWNER_TOKEN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .call(Method::GET, &format!("/api/public/forms/{}", id), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Form not found");
}

#[tokio::test]
async fn deleted_form_is_gone() {
    let app = TestApp::new();
    let id = app.create_form(contact_form()).await;
    let path = format!("/api/forms/{}", id);

    let (status, _) = app.call(Method::DELETE, &path, Some(OWNER_TOKEN), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.call(Method::GET, &path, Some(OWNER_TOKEN), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn generated_draft_is_typed_and_not_saved() {
    let app = TestApp::new();
    let (status, body) = app
        .call(
            Method::POST,
            "/api/forms/generate",
            Some(OWNER_TOKEN),
            Some(json!({"prompt": "A contact form"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Contact Us");
    assert_eq!(body["elements"][1]["type"], "email");
    assert_eq!(app.generator.prompts(), vec!["A contact form".to_string()]);

    let (_, listed) = app
        .call(Method::GET, "/api/forms", Some(OWNER_TOKEN), None)
        .await;
    assert!(listed["forms"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn empty_prompt_is_a_bad_request() {
    let app = TestApp::new();
    let (status, _) = app
        .call(
            Method::POST,
            "/api/forms/generate",
            Some(OWNER_TOKEN),
            Some(json!({"prompt": "   "})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.generator.call_count(), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Public submission
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn draft_form_is_not_public() {
    let app = TestApp::new();
    let id = app.create_form(contact_form()).await;

    let (status, _) = app
        .call(Method::GET, &format!("/api/public/forms/{}", id), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .call(
            Method::POST,
            "/api/public/submissions",
            None,
            Some(json!({"formId": id, "data": {"name": "Ada"}})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Form not found");
}

#[tokio::test]
async fn malformed_form_id_reads_as_missing_form() {
    let app = TestApp::new();

    let (status, body) = app
        .call(
            Method::POST,
            "/api/public/submissions",
            None,
            Some(json!({"formId": "does-not-exist", "data": {}})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Form not found");
    assert!(body.get("errors").is_none());

    let (status, _) = app
        .call(
            Method::POST,
            "/api/public/submissions",
            None,
            Some(json!({"data": {"name": "Ada"}})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn published_form_is_served_without_owner_details() {
    let app = TestApp::new();
    let id = app.publish_form(contact_form(), json!({})).await;

    let (status, body) = app
        .call(Method::GET, &format!("/api/public/forms/{}", id), None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Contact");
    assert_eq!(body["allowAnonymous"], true);
    assert!(body.get("status").is_none());
}

#[tokio::test]
async fn invalid_submission_returns_every_field_error() {
    let app = TestApp::new();
    let id = app.publish_form(contact_form(), json!({})).await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/public/submissions",
            None,
            Some(json!({
                "formId": id,
                "data": {"message": "this message is far too long"}
            })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["name"], "Name is required");
    assert_eq!(
        body["errors"]["message"],
        "Message must be no more than 20 characters"
    );
    assert!(body["errors"].get("topic").is_none());
}

#[tokio::test]
async fn valid_anonymous_submission_is_recorded() {
    let app = TestApp::new();
    let id = app.publish_form(contact_form(), json!({})).await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/public/submissions",
            None,
            Some(json!({"formId": id, "data": {"name": "Ada", "topic": "Sales"}})),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["submissionId"].as_str().is_some());
}

#[tokio::test]
async fn sign_in_required_form_rejects_anonymous_submitters() {
    let app = TestApp::new();
    let id = app
        .publish_form(contact_form(), json!({"allowAnonymous": false}))
        .await;
    let submission = json!({"formId": id, "data": {"name": "Ada"}});

    let (status, _) = app
        .call(
            Method::POST,
            "/api/public/submissions",
            None,
            Some(submission.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .call(
            Method::POST,
            "/api/public/submissions",
            Some(STRANGER_TOKEN),
            Some(submission),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn email_collecting_form_requires_submitter_email() {
    let app = TestApp::new();
    let id = app
        .publish_form(contact_form(), json!({"collectEmails": true}))
        .await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/public/submissions",
            None,
            Some(json!({"formId": id, "data": {"name": "Ada"}})),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["email"], "Email is required");
}
