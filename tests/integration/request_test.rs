//! Request lifecycle over HTTP: create, list, respond.

use http::{Method, StatusCode};
use serde_json::{Value, json};

use crs_entity::course::CourseId;
use crs_entity::user::Role;

use crate::helpers::{TestApp, comp1023, comp1023_json};

fn swap_request_body() -> Value {
    json!({
        "class": { "course": { "code": "COMP 1023", "term": "2510" }, "section": "L1" },
        "reason": "Schedule conflict with another course",
        "proof": [],
        "payload": {
            "type": "Swap Section",
            "from_section": "L1",
            "from_date": "2025-09-20",
            "to_section": "L2",
            "to_date": "2025-09-20"
        }
    })
}

async fn seeded_app() -> TestApp {
    let app = TestApp::new();
    app.seed_course(comp1023_json()).await;
    app.seed_user("s@ust.hk", &comp1023(), Role::Student, &["L1"])
        .await;
    app.seed_user("i@ust.hk", &comp1023(), Role::Instructor, &["L1"])
        .await;
    app.seed_user(
        "other@ust.hk",
        &CourseId {
            code: "COMP 2011".to_string(),
            term: "2510".to_string(),
        },
        Role::Instructor,
        &["L1"],
    )
    .await;
    app
}

#[tokio::test]
async fn test_request_lifecycle() {
    let app = seeded_app().await;
    let student = app.token("s@ust.hk", "Student");
    let instructor = app.token("i@ust.hk", "Instructor");
    let other = app.token("other@ust.hk", "Other Instructor");

    // The student files a swap-section request.
    let (status, body) = app
        .request(
            Method::POST,
            "/api/requests",
            Some(&student),
            Some(swap_request_body()),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().expect("id").to_string();

    // Visible to the requester and the class's instructor.
    for token in [&student, &instructor] {
        let (status, body) = app
            .request(Method::GET, "/api/requests", Some(token.as_str()), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let listed = body.as_array().expect("array");
        assert!(listed.iter().any(|r| r["id"] == id.as_str()));
    }

    // Invisible to an instructor of an unrelated class.
    let (_, body) = app
        .request(Method::GET, "/api/requests", Some(&other), None)
        .await;
    assert_eq!(body, json!([]));

    // The class's instructor responds.
    let uri = format!("/api/requests/{id}/response");
    let (status, _) = app
        .request(
            Method::POST,
            &uri,
            Some(&instructor),
            Some(json!({ "decision": "Approve", "remarks": "Request approved" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // A second response conflicts and leaves the original untouched.
    let (status, body) = app
        .request(
            Method::POST,
            &uri,
            Some(&instructor),
            Some(json!({ "decision": "Reject", "remarks": "Changed my mind" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");

    let uri = format!("/api/requests/{id}");
    let (_, body) = app.request(Method::GET, &uri, Some(&student), None).await;
    assert_eq!(body["response"]["decision"], "Approve");
    assert_eq!(body["response"]["remarks"], "Request approved");
    assert_eq!(body["response"]["from"], "i@ust.hk");
}

#[tokio::test]
async fn test_create_request_unknown_course() {
    let app = seeded_app().await;
    let student = app.token("s@ust.hk", "Student");

    let mut body = swap_request_body();
    body["class"]["course"]["code"] = json!("COMP 9999");
    let (status, response) = app
        .request(Method::POST, "/api/requests", Some(&student), Some(body))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_request_requires_class_enrollment() {
    let app = seeded_app().await;
    let lurker = app.token("lurker@ust.hk", "Lurker");
    app.request(Method::POST, "/api/users/sync", Some(&lurker), None)
        .await;

    // Enrolled nowhere: an enrollment error, not a not-found.
    let (status, body) = app
        .request(
            Method::POST,
            "/api/requests",
            Some(&lurker),
            Some(swap_request_body()),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_create_request_rejects_empty_reason() {
    let app = seeded_app().await;
    let student = app.token("s@ust.hk", "Student");

    let mut body = swap_request_body();
    body["reason"] = json!("");
    let (status, _) = app
        .request(Method::POST, "/api/requests", Some(&student), Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_request() {
    let app = seeded_app().await;
    let student = app.token("s@ust.hk", "Student");
    let uri = format!("/api/requests/{}", uuid::Uuid::new_v4());
    let (status, _) = app.request(Method::GET, &uri, Some(&student), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deadline_extension_request() {
    let app = seeded_app().await;
    let student = app.token("s@ust.hk", "Student");

    let body = json!({
        "class": { "course": { "code": "COMP 1023", "term": "2510" }, "section": "L1" },
        "reason": "Sick during the assignment week",
        "proof": [{
            "filename": "note.pdf",
            "content_type": "application/pdf",
            "url": "https://files.crs.test/note.pdf"
        }],
        "payload": {
            "type": "Deadline Extension",
            "assignment": "PA1",
            "deadline": "2025-10-05T23:59:00Z"
        }
    });
    let (status, body) = app
        .request(Method::POST, "/api/requests", Some(&student), Some(body))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let id = body["id"].as_str().expect("id");
    let uri = format!("/api/requests/{id}");
    let (_, fetched) = app.request(Method::GET, &uri, Some(&student), None).await;
    assert_eq!(fetched["payload"]["type"], "Deadline Extension");
    assert_eq!(fetched["payload"]["assignment"], "PA1");
    assert_eq!(fetched["details"]["proof"][0]["filename"], "note.pdf");
}
