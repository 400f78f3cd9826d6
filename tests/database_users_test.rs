// ABOUTME: Unit tests for user database operations
// ABOUTME: Validates creation, lookup paths, and email uniqueness enforcement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use ironlog_server::errors::ErrorCode;
use ironlog_server::models::User;
use uuid::Uuid;

#[tokio::test]
async fn test_create_and_get_user() {
    let db = common::create_test_database().await;

    let user = User::new(
        format!("test_{}@example.com", Uuid::new_v4()),
        "$2b$12$hash".into(),
        "Test User".into(),
    );

    let user_id = db.create_user(&user).await.expect("Failed to create user");
    assert_eq!(user_id, user.id);

    let retrieved = db
        .get_user_by_id(user.id)
        .await
        .expect("Failed to get user")
        .expect("User not found");
    assert_eq!(retrieved.email, user.email);
    assert_eq!(retrieved.display_name, user.display_name);
    assert_eq!(retrieved.password_hash, user.password_hash);
    assert!(retrieved.google_id.is_none());

    let retrieved_by_email = db
        .get_user_by_email(&user.email)
        .await
        .expect("Failed to get user by email")
        .expect("User not found");
    assert_eq!(retrieved_by_email.id, user.id);
}

#[tokio::test]
async fn test_duplicate_email_rejected_by_store() {
    let db = common::create_test_database().await;

    let first = User::new("dup@example.com".into(), "hash-a".into(), "First".into());
    db.create_user(&first).await.expect("first create");

    // Same email, different id: the UNIQUE constraint must reject it
    let second = User::new("dup@example.com".into(), "hash-b".into(), "Second".into());
    let err = db.create_user(&second).await.expect_err("must reject");
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_get_user_by_google_id() {
    let db = common::create_test_database().await;

    let user = User::new_google(
        "108234567890".into(),
        "g@example.com".into(),
        "G User".into(),
        Some("https://example.com/pic.jpg".into()),
    );
    db.create_user(&user).await.expect("create google user");

    let found = db
        .get_user_by_google_id("108234567890")
        .await
        .expect("lookup")
        .expect("user should exist");
    assert_eq!(found.id, user.id);
    assert_eq!(found.email, "g@example.com");
    assert!(found.password_hash.is_none());
    assert_eq!(
        found.avatar_url.as_deref(),
        Some("https://example.com/pic.jpg")
    );

    let missing = db
        .get_user_by_google_id("999999999999")
        .await
        .expect("lookup");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_get_missing_user_returns_none() {
    let db = common::create_test_database().await;

    let by_id = db.get_user_by_id(Uuid::new_v4()).await.expect("lookup");
    assert!(by_id.is_none());

    let by_email = db
        .get_user_by_email("nobody@example.com")
        .await
        .expect("lookup");
    assert!(by_email.is_none());
}
