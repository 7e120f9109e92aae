//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crs_api::extractors::auth::issue_token;
use crs_api::{AppState, build_router};
use crs_core::config::app::ServerConfig;
use crs_core::config::logging::LoggingConfig;
use crs_core::config::notify::NotifyConfig;
use crs_core::config::policy::PolicyConfig;
use crs_core::config::{AppConfig, AuthConfig, DatabaseConfig};
use crs_database::MemoryStore;
use crs_database::store::{CourseStore, UserStore};
use crs_entity::course::CourseId;
use crs_entity::user::{Enrollment, Role};
use crs_service::access::ViewerPolicy;
use crs_service::notify::{Mailer, NotificationService};
use crs_service::{CourseService, RequestService, UserService};

const TEST_SECRET: &str = "integration-test-secret";

/// Test application context: the router over an in-memory store.
pub struct TestApp {
    /// The axum router for making test requests.
    pub router: Router,
    /// The backing store, for direct seeding.
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    /// Create a new test application.
    pub fn new() -> Self {
        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://unused".to_string(),
                max_connections: 1,
                min_connections: 1,
                connect_timeout_seconds: 1,
                idle_timeout_seconds: 1,
            },
            auth: AuthConfig {
                token_secret: TEST_SECRET.to_string(),
            },
            notify: NotifyConfig::default(),
            policy: PolicyConfig::default(),
            logging: LoggingConfig::default(),
        };

        let store = Arc::new(MemoryStore::new());
        let policy = ViewerPolicy::from_config(&config.policy).expect("valid policy");
        let mailer = Mailer::from_config(&config.notify).expect("suppressed mailer");
        let notifications = Arc::new(NotificationService::new(
            store.clone(),
            mailer,
            "https://crs.test",
        ));

        let state = AppState {
            config: Arc::new(config),
            user_service: Arc::new(UserService::new(store.clone(), policy)),
            course_service: Arc::new(CourseService::new(
                store.clone(),
                store.clone(),
                store.clone(),
            )),
            request_service: Arc::new(RequestService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                notifications,
            )),
        };

        Self {
            router: build_router(state),
            store,
        }
    }

    /// Mint a bearer token for the given identity.
    pub fn token(&self, email: &str, name: &str) -> String {
        let exp = chrono::Utc::now().timestamp() + 3600;
        issue_token(email, name, TEST_SECRET, exp).expect("token")
    }

    /// Issue a request and return (status, decoded JSON body).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(value) => builder
                .header("content-type", "application/json")
                .body(Body::from(value.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    /// Seed a user with one enrollment directly in the store.
    pub async fn seed_user(&self, email: &str, course: &CourseId, role: Role, sections: &[&str]) {
        let users: Arc<dyn UserStore> = self.store.clone();
        users.create_if_absent(email).await.expect("create user");
        users.set_name(email, email).await.expect("set name");
        users
            .add_enrollment(
                email,
                &Enrollment {
                    course: course.clone(),
                    role,
                    sections: sections.iter().map(|s| s.to_string()).collect(),
                },
            )
            .await
            .expect("add enrollment");
    }

    /// Seed a course directly in the store from its JSON form.
    pub async fn seed_course(&self, course: Value) {
        let courses: Arc<dyn CourseStore> = self.store.clone();
        let course = serde_json::from_value(course).expect("course json");
        courses.insert(&course).await.expect("insert course");
    }
}

/// Canonical test course identity.
pub fn comp1023() -> CourseId {
    CourseId {
        code: "COMP 1023".to_string(),
        term: "2510".to_string(),
    }
}

/// JSON form of the canonical test course.
pub fn comp1023_json() -> Value {
    json!({
        "code": "COMP 1023",
        "term": "2510",
        "title": "Python Programming",
        "sections": {
            "L1": { "schedule": [{ "day": 1, "from": "10:30:00", "to": "12:00:00" }] },
            "L2": { "schedule": [{ "day": 2, "from": "10:30:00", "to": "12:00:00" }] }
        },
        "assignments": {
            "PA1": {
                "name": "Programming Assignment 1",
                "due": "2025-10-01T23:59:00Z",
                "max_extension_secs": 604800
            }
        },
        "effective_request_types": {
            "Swap Section": true,
            "Deadline Extension": true
        }
    })
}

/// URL path segment pair for the canonical test course.
pub const COMP1023_PATH: &str = "COMP%201023/2510";
