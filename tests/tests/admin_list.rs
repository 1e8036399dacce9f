//! Admin listing: GET /api/contact.

use axum::http::StatusCode;
use integration_tests::{
    fixtures,
    setup::{TestContext, ADMIN_KEY},
};
use serde_json::Value;

#[tokio::test]
async fn test_list_without_key_is_unauthorized() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/contact").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_list_with_wrong_key_is_unauthorized() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for key in ["wrong", "test-admin-ke", "TEST-ADMIN-KEY"] {
        server
            .get("/api/contact")
            .add_header("X-API-Key", key)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_unconfigured_key_denies_everyone() {
    let ctx = TestContext::without_admin_key();
    let server = ctx.server();

    server
        .get("/api/contact")
        .add_header("X-API-Key", ADMIN_KEY)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/api/contact")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_empty_listing() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get("/api/contact")
        .add_header("X-API-Key", ADMIN_KEY)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
    assert_eq!(body["submissions"], Value::Array(vec![]));
}

/// Insertion order, oldest of the returned window first.
#[tokio::test]
async fn test_listing_order() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let mut ids = Vec::new();
    for n in 0..3 {
        let response = server
            .post("/api/contact")
            .add_header("X-Forwarded-For", fixtures::client_ip(n).as_str())
            .json(&fixtures::lead_with("name", format!("Lead {}", n).into()))
            .await;
        ids.push(response.json::<Value>()["submissionId"].clone());
    }

    let body: Value = server
        .get("/api/contact")
        .add_header("X-API-Key", ADMIN_KEY)
        .await
        .json();

    assert_eq!(body["count"], 3);
    let listed: Vec<Value> = body["submissions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].clone())
        .collect();
    assert_eq!(listed, ids);
    assert_eq!(body["submissions"][2]["name"], "Lead 2");
}

/// Listing is not rate limited.
#[tokio::test]
async fn test_listing_not_rate_limited() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for _ in 0..10 {
        server
            .get("/api/contact")
            .add_header("X-API-Key", ADMIN_KEY)
            .await
            .assert_status_ok();
    }
}
