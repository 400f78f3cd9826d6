// ABOUTME: Integration tests for registration, login, Google Sign-In, and /me
// ABOUTME: Exercises the auth endpoints through the full router via oneshot requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::StatusCode;
use common::TestRequest;
use ironlog_server::auth::SessionPrincipal;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_register_returns_password_session_token() {
    let app = common::create_test_app().await;

    let response = TestRequest::post("/auth/register")
        .json(&json!({"email": "a@x.com", "password": "pw123", "name": "A"}))
        .send(app)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["name"], "A");

    let token = body["session_token"].as_str().expect("token");
    assert!(token.starts_with("sess_uid_"));

    // Token decodes back to the registered user's id
    let principal = SessionPrincipal::decode(token).expect("decode");
    let user_id = body["user"]["user_id"].as_str().expect("user_id");
    assert_eq!(
        principal,
        SessionPrincipal::Password {
            user_id: Uuid::parse_str(user_id).expect("uuid"),
        }
    );
}

#[tokio::test]
async fn test_register_duplicate_email_is_bad_request() {
    let app = common::create_test_app().await;

    let request = json!({"email": "dup@x.com", "password": "pw123", "name": "Dup"});
    let first = TestRequest::post("/auth/register")
        .json(&request)
        .send(app.clone())
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = TestRequest::post("/auth/register")
        .json(&request)
        .send(app)
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.json()["error"]["code"], "RESOURCE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_invalid_email_is_bad_request() {
    let app = common::create_test_app().await;

    let response = TestRequest::post("/auth/register")
        .json(&json!({"email": "not-an-email", "password": "pw123", "name": "X"}))
        .send(app)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = common::create_test_app().await;

    TestRequest::post("/auth/register")
        .json(&json!({"email": "b@x.com", "password": "correct-pw", "name": "B"}))
        .send(app.clone())
        .await;

    let response = TestRequest::post("/auth/login")
        .json(&json!({"email": "b@x.com", "password": "wrong-pw"}))
        .send(app)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"]["code"], "AUTH_INVALID");
}

#[tokio::test]
async fn test_login_with_unknown_email_is_unauthorized() {
    let app = common::create_test_app().await;

    let response = TestRequest::post("/auth/login")
        .json(&json!({"email": "ghost@x.com", "password": "pw123"}))
        .send(app)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_round_trips_to_same_user() {
    let app = common::create_test_app().await;

    let registered = TestRequest::post("/auth/register")
        .json(&json!({"email": "c@x.com", "password": "pw123", "name": "C"}))
        .send(app.clone())
        .await
        .json();
    let registered_id = registered["user"]["user_id"].as_str().expect("id").to_owned();

    let response = TestRequest::post("/auth/login")
        .json(&json!({"email": "c@x.com", "password": "pw123"}))
        .send(app)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["user"]["user_id"], registered_id.as_str());

    let principal =
        SessionPrincipal::decode(body["session_token"].as_str().expect("token")).expect("decode");
    assert_eq!(principal.owner_id(), registered_id);
}

#[tokio::test]
async fn test_me_returns_registered_identity() {
    let app = common::create_test_app().await;

    let registered = TestRequest::post("/auth/register")
        .json(&json!({"email": "me@x.com", "password": "pw123", "name": "Me"}))
        .send(app.clone())
        .await
        .json();
    let token = registered["session_token"].as_str().expect("token").to_owned();

    // Preferred transport: Authorization header
    let via_header = TestRequest::get("/me").bearer(&token).send(app.clone()).await;
    assert_eq!(via_header.status, StatusCode::OK);
    assert_eq!(via_header.json()["email"], "me@x.com");
    assert_eq!(via_header.json()["name"], "Me");

    // Legacy transport: query parameter
    let via_query = TestRequest::get(&format!("/me?session_token={token}"))
        .send(app)
        .await;
    assert_eq!(via_query.status, StatusCode::OK);
    assert_eq!(via_query.json()["email"], "me@x.com");
}

#[tokio::test]
async fn test_me_with_invalid_token_is_unauthorized() {
    let app = common::create_test_app().await;

    let garbage = TestRequest::get("/me?session_token=garbage").send(app.clone()).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    // Structurally valid token for a user that does not exist
    let orphan = format!("sess_uid_{}", Uuid::new_v4());
    let response = TestRequest::get(&format!("/me?session_token={orphan}"))
        .send(app.clone())
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let missing = TestRequest::get("/me").send(app).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_google_dev_bypass_is_idempotent() {
    let app = common::create_test_app().await;

    let first = TestRequest::post("/auth/google")
        .json(&json!({"token": "dev_bypass_token"}))
        .send(app.clone())
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let first_body = first.json();
    assert_eq!(first_body["user"]["email"], "dev@ironlog.test");
    assert_eq!(first_body["user"]["name"], "Dev User");
    assert_eq!(first_body["session_token"], "session_dev_user_123");

    // Second login resolves to the same user; no duplicate is created
    let second = TestRequest::post("/auth/google")
        .json(&json!({"token": "dev_bypass_token"}))
        .send(app.clone())
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(
        second.json()["user"]["user_id"],
        first_body["user"]["user_id"]
    );

    // The session token resolves via /me like any other
    let me = TestRequest::get("/me?session_token=session_dev_user_123")
        .send(app)
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json()["email"], "dev@ironlog.test");
}

#[tokio::test]
async fn test_health_and_root_respond() {
    let app = common::create_test_app().await;

    let root = TestRequest::get("/").send(app.clone()).await;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.json()["message"], "Ironlog API is running");

    let health = TestRequest::get("/health").send(app).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.json()["status"], "ok");
    assert_eq!(health.json()["database"], true);
}
