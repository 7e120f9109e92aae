//! Course creation, lookup, and instructor-side mutation over HTTP.

use http::{Method, StatusCode};
use serde_json::json;

use crs_entity::course::CourseId;
use crs_entity::user::Role;

use crate::helpers::{COMP1023_PATH, TestApp, comp1023, comp1023_json};

#[tokio::test]
async fn test_create_then_get_round_trips() {
    let app = TestApp::new();
    app.seed_user("s@ust.hk", &comp1023(), Role::Student, &["L1"])
        .await;
    let admin = app.token("admin@ust.hk", "Admin");
    let student = app.token("s@ust.hk", "Student");

    let (status, _) = app
        .request(
            Method::POST,
            "/api/courses",
            Some(&admin),
            Some(comp1023_json()),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/courses/{COMP1023_PATH}");
    let (status, body) = app.request(Method::GET, &uri, Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, comp1023_json());
}

#[tokio::test]
async fn test_duplicate_create_conflicts() {
    let app = TestApp::new();
    let admin = app.token("admin@ust.hk", "Admin");

    app.seed_course(comp1023_json()).await;
    let (status, body) = app
        .request(
            Method::POST,
            "/api/courses",
            Some(&admin),
            Some(comp1023_json()),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_get_course_requires_enrollment() {
    let app = TestApp::new();
    app.seed_course(comp1023_json()).await;

    let stranger = app.token("stranger@ust.hk", "Stranger");
    app.request(Method::POST, "/api/users/sync", Some(&stranger), None)
        .await;

    let uri = format!("/api/courses/{COMP1023_PATH}");
    let (status, _) = app.request(Method::GET, &uri, Some(&stranger), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_own_courses_skip_deleted() {
    let app = TestApp::new();
    app.seed_course(comp1023_json()).await;
    app.seed_user("s@ust.hk", &comp1023(), Role::Student, &["L1"])
        .await;
    // Enrollment referencing a course that was never created.
    app.seed_user(
        "s@ust.hk",
        &CourseId {
            code: "COMP 9999".to_string(),
            term: "2510".to_string(),
        },
        Role::Student,
        &["L1"],
    )
    .await;

    let student = app.token("s@ust.hk", "Student");
    let (status, body) = app
        .request(Method::GET, "/api/courses", Some(&student), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let courses = body.as_array().expect("array");
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["code"], "COMP 1023");
}

#[tokio::test]
async fn test_request_types_overwrite_wholesale() {
    let app = TestApp::new();
    app.seed_course(comp1023_json()).await;
    app.seed_user("i@ust.hk", &comp1023(), Role::Instructor, &["L1"])
        .await;
    let instructor = app.token("i@ust.hk", "Instructor");

    let uri = format!("/api/courses/{COMP1023_PATH}/request-types");
    let (status, _) = app
        .request(
            Method::PUT,
            &uri,
            Some(&instructor),
            Some(json!({ "effective_request_types": { "Swap Section": false } })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // The map was replaced, not merged: the previously-true
    // "Deadline Extension" entry is gone.
    let uri = format!("/api/courses/{COMP1023_PATH}");
    let (_, body) = app.request(Method::GET, &uri, Some(&instructor), None).await;
    assert_eq!(
        body["effective_request_types"],
        json!({ "Swap Section": false })
    );
}

#[tokio::test]
async fn test_mutation_requires_instructor() {
    let app = TestApp::new();
    app.seed_course(comp1023_json()).await;
    app.seed_user("s@ust.hk", &comp1023(), Role::Student, &["L1"])
        .await;
    let student = app.token("s@ust.hk", "Student");

    let uri = format!("/api/courses/{COMP1023_PATH}/sections");
    let (status, _) = app
        .request(
            Method::PUT,
            &uri,
            Some(&student),
            Some(json!({ "sections": {} })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
