//! User sync, profile, roster, and enrollment management over HTTP.

use http::{Method, StatusCode};
use serde_json::json;

use crs_entity::user::Role;

use crate::helpers::{COMP1023_PATH, TestApp, comp1023, comp1023_json};

#[tokio::test]
async fn test_sync_then_me() {
    let app = TestApp::new();
    let token = app.token("alice@connect.ust.hk", "Alice");

    let (status, _) = app
        .request(Method::POST, "/api/users/sync", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(Method::GET, "/api/users/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@connect.ust.hk");
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["enrollment"], json!([]));
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new();
    let (status, body) = app.request(Method::GET, "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_me_unknown_user_not_found() {
    let app = TestApp::new();
    let token = app.token("ghost@ust.hk", "Ghost");
    let (status, _) = app
        .request(Method::GET, "/api/users/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_enrollment_management_round_trip() {
    let app = TestApp::new();
    app.seed_course(comp1023_json()).await;
    app.seed_user("i@ust.hk", &comp1023(), Role::Instructor, &["L1"])
        .await;
    let instructor = app.token("i@ust.hk", "Instructor");

    let enrollment_body = json!({
        "user": "bob@connect.ust.hk",
        "enrollment": {
            "course": { "code": "COMP 1023", "term": "2510" },
            "role": "student",
            "sections": ["L1"]
        }
    });

    // Grant an enrollment to a user who has never logged in.
    let (status, _) = app
        .request(
            Method::POST,
            "/api/enrollments",
            Some(&instructor),
            Some(enrollment_body.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // The user appears in the class roster exactly once.
    let uri = format!("/api/courses/{COMP1023_PATH}/classes/L1/users?role=student");
    let (status, body) = app
        .request(Method::GET, &uri, Some(&instructor), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let students = body.as_array().expect("array");
    assert_eq!(
        students
            .iter()
            .filter(|u| u["email"] == "bob@connect.ust.hk")
            .count(),
        1
    );

    // Delete it; the roster is empty again.
    let (status, _) = app
        .request(
            Method::DELETE,
            "/api/enrollments",
            Some(&instructor),
            Some(enrollment_body),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .request(Method::GET, &uri, Some(&instructor), None)
        .await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_students_cannot_list_students() {
    let app = TestApp::new();
    app.seed_course(comp1023_json()).await;
    app.seed_user("s@ust.hk", &comp1023(), Role::Student, &["L1"])
        .await;
    let student = app.token("s@ust.hk", "Student");

    let uri = format!("/api/courses/{COMP1023_PATH}/classes/L1/users?role=student");
    let (status, body) = app.request(Method::GET, &uri, Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    // But the same student may list the class's instructors.
    let uri = format!("/api/courses/{COMP1023_PATH}/classes/L1/users?role=instructor");
    let (status, _) = app.request(Method::GET, &uri, Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
}
