//! End-to-end tests exercising the HTTP router.

mod helpers;

mod course_test;
mod request_test;
mod user_test;
