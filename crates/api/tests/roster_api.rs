//! HTTP-level tests for register, suspend and common-student endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use classroom_core::memory::MemoryRosterStore;
use common::{body_bytes, body_json, get, post_json};
use serde_json::json;

async fn register(store: &Arc<MemoryRosterStore>, teacher: &str, students: &[&str]) {
    let response = post_json(
        common::build_test_app(store.clone()),
        "/api/register",
        json!({"teacher": teacher, "students": students}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_register_returns_204_with_empty_body() {
    let store = Arc::new(MemoryRosterStore::new());
    let response = post_json(
        common::build_test_app(store),
        "/api/register",
        json!({"teacher": "t1@gmail.com", "students": ["s1@gmail.com", "s2@gmail.com"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_returns_409() {
    let store = Arc::new(MemoryRosterStore::new());
    register(&store, "t1@gmail.com", &["s1@gmail.com"]).await;

    let response = post_json(
        common::build_test_app(store),
        "/api/register",
        json!({"teacher": "t1@gmail.com", "students": ["s1@gmail.com"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Student has been registered previously.");
}

#[tokio::test]
async fn test_register_without_teacher_returns_400() {
    let store = Arc::new(MemoryRosterStore::new());
    let response = post_json(
        common::build_test_app(store),
        "/api/register",
        json!({"students": ["s1@gmail.com"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Missing teacher specified.");
}

#[tokio::test]
async fn test_suspend_then_suspend_again() {
    let store = Arc::new(MemoryRosterStore::new());

    let first = post_json(
        common::build_test_app(store.clone()),
        "/api/suspend",
        json!({"student": "s1@gmail.com"}),
    )
    .await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = post_json(
        common::build_test_app(store),
        "/api/suspend",
        json!({"student": "s1@gmail.com"}),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_suspended_student_drops_out_of_notifications() {
    let store = Arc::new(MemoryRosterStore::new());

    let response = post_json(
        common::build_test_app(store.clone()),
        "/api/retrievefornotifications",
        json!({"teacher": "t1@gmail.com", "notification": "hi @s1@gmail.com @s2@gmail.com"}),
    )
    .await;
    assert_eq!(body_json(response).await["students"], json!(["s1@gmail.com", "s2@gmail.com"]));

    post_json(
        common::build_test_app(store.clone()),
        "/api/suspend",
        json!({"student": "s2@gmail.com"}),
    )
    .await;

    let response = post_json(
        common::build_test_app(store),
        "/api/retrievefornotifications",
        json!({"teacher": "t1@gmail.com", "notification": "again"}),
    )
    .await;
    assert_eq!(body_json(response).await["students"], json!(["s1@gmail.com"]));
}

#[tokio::test]
async fn test_common_students_across_teachers() {
    let store = Arc::new(MemoryRosterStore::new());
    register(&store, "t1@gmail.com", &["s1@gmail.com", "s2@gmail.com", "s3@gmail.com"]).await;
    register(&store, "t2@gmail.com", &["s2@gmail.com", "s3@gmail.com", "s4@gmail.com"]).await;

    let response = get(
        common::build_test_app(store.clone()),
        "/api/commonstudents?teacher=t1%40gmail.com&teacher=t2%40gmail.com",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"students": ["s2@gmail.com", "s3@gmail.com"]})
    );

    let response = get(
        common::build_test_app(store),
        "/api/commonstudents?teacher=t1%40gmail.com",
    )
    .await;
    assert_eq!(
        body_json(response).await["students"],
        json!(["s1@gmail.com", "s2@gmail.com", "s3@gmail.com"])
    );
}

#[tokio::test]
async fn test_common_students_without_teacher_returns_400() {
    let store = Arc::new(MemoryRosterStore::new());
    let response = get(common::build_test_app(store), "/api/commonstudents").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "No teacher specified.");
}
