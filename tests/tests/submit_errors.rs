//! Validation and error responses for POST /api/contact.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};
use serde_json::{json, Value};

const NAME_ERROR: &str = "Name is required and must be at least 2 characters";
const EMAIL_ERROR: &str = "Please enter a valid email address";
const PHONE_ERROR: &str = "Please enter a valid phone number";
const FORM_TYPE_ERROR: &str = "Invalid form type";
const INTERNAL_ERROR: &str = "An error occurred. Please try again.";

async fn submit(server: &TestServer, lead: &Value) -> (StatusCode, Value) {
    let response = server.post("/api/contact").json(lead).await;
    (response.status_code(), response.json())
}

async fn assert_rejected(server: &TestServer, lead: Value, message: &str) {
    let (status, body) = submit(server, &lead).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", lead);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], message);
}

async fn assert_accepted(server: &TestServer, lead: Value) {
    let (status, body) = submit(server, &lead).await;
    assert_eq!(status, StatusCode::OK, "payload: {} body: {}", lead, body);
}

// Each test uses a fresh context, so the shared "unknown" bucket allows 5.

#[tokio::test]
async fn test_name_validation() {
    let ctx = TestContext::new();
    let server = ctx.server();

    assert_rejected(&server, fixtures::lead_without("name"), NAME_ERROR).await;
    assert_rejected(&server, fixtures::lead_with("name", "".into()), NAME_ERROR).await;
    assert_rejected(&server, fixtures::lead_with("name", "A".into()), NAME_ERROR).await;
    assert_rejected(&server, fixtures::lead_with("name", "  A  ".into()), NAME_ERROR).await;
    assert_accepted(&server, fixtures::lead_with("name", "Al".into())).await;
}

#[tokio::test]
async fn test_email_validation() {
    let ctx = TestContext::new();
    let server = ctx.server();

    assert_rejected(
        &server,
        fixtures::lead_with("email", "not-an-email".into()),
        EMAIL_ERROR,
    )
    .await;
    assert_accepted(&server, fixtures::lead_with("email", "a@b.com".into())).await;
    assert_accepted(&server, fixtures::lead_without("email")).await;
}

#[tokio::test]
async fn test_phone_validation() {
    let ctx = TestContext::new();
    let server = ctx.server();

    assert_rejected(&server, fixtures::lead_with("phone", "12345".into()), PHONE_ERROR).await;
    assert_rejected(
        &server,
        fixtures::lead_with("phone", "call me maybe".into()),
        PHONE_ERROR,
    )
    .await;
    assert_accepted(&server, fixtures::lead_with("phone", "+91 98765 43210".into())).await;
    assert_accepted(&server, fixtures::lead_without("phone")).await;
}

#[tokio::test]
async fn test_form_type_validation() {
    let ctx = TestContext::new();
    let server = ctx.server();

    assert_rejected(
        &server,
        fixtures::lead_with("formType", "spam".into()),
        FORM_TYPE_ERROR,
    )
    .await;
    assert_rejected(&server, fixtures::lead_without("formType"), FORM_TYPE_ERROR).await;

    for form_type in ["contact", "consultation", "catalogue"] {
        assert_accepted(&server, fixtures::lead_with("formType", form_type.into())).await;
    }
}

/// A `formType` of the wrong JSON type is a validation error, not a 500.
#[tokio::test]
async fn test_non_string_form_type_is_invalid() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for value in [json!(42), json!(["contact"]), json!(true), json!(null)] {
        assert_rejected(&server, fixtures::lead_with("formType", value), FORM_TYPE_ERROR).await;
    }
}

/// First failing field wins.
#[tokio::test]
async fn test_validation_order() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let mut lead = fixtures::lead_with("email", "nope".into());
    lead["phone"] = "1".into();
    lead["formType"] = "spam".into();
    assert_rejected(&server, lead.clone(), EMAIL_ERROR).await;

    lead["email"] = "a@b.com".into();
    assert_rejected(&server, lead.clone(), PHONE_ERROR).await;

    lead["name"] = "X".into();
    assert_rejected(&server, lead, NAME_ERROR).await;
}

#[tokio::test]
async fn test_malformed_body_is_internal_error() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/contact")
        .content_type("application/json")
        .text("{\"name\": \"Jane\",")
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], INTERNAL_ERROR);

    let (status, body) = submit(&server, &serde_json::json!({ "name": 42 })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], INTERNAL_ERROR);
}

/// Rejected requests still count against the window.
#[tokio::test]
async fn test_invalid_requests_consume_quota() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for _ in 0..5 {
        let response = server
            .post("/api/contact")
            .add_header("X-Real-IP", "198.51.100.4")
            .json(&fixtures::lead_with("name", "A".into()))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    server
        .post("/api/contact")
        .add_header("X-Real-IP", "198.51.100.4")
        .json(&fixtures::valid_lead())
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

/// Clients without forwarding headers share one bucket.
#[tokio::test]
async fn test_headerless_clients_share_bucket() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for _ in 0..5 {
        assert_accepted(&server, fixtures::valid_lead()).await;
    }
    let (status, _) = submit(&server, &fixtures::valid_lead()).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(ctx.state.service.rate_limiter().tracked_keys(), 1);
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let lead = fixtures::lead_with("message", "x".repeat(70_000).into());
    let response = server.post("/api/contact").json(&lead).await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Request body too large");
    assert_eq!(ctx.stored(), 0);

    // the rejected body used none of the client's quota
    for _ in 0..5 {
        assert_accepted(&server, fixtures::valid_lead()).await;
    }
}
