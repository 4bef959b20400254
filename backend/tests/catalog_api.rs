//! Endpoint tests for the health and catalog read routes.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use backend::domain::{CourseCatalog, RegistrationService};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::JsonStudentRepository;
use backend::server::build_app;

fn test_state(dir: &TempDir) -> web::Data<HttpState> {
    let repository =
        JsonStudentRepository::new(dir.path().join("students.json")).expect("repository");
    let registration = Arc::new(RegistrationService::new(Arc::new(repository)));
    web::Data::new(HttpState::new(
        registration,
        Arc::new(CourseCatalog::embedded()),
    ))
}

#[actix_web::test]
async fn health_answers_ok_with_a_trace_header() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test::init_service(build_app(test_state(&dir))).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("trace-id"));

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], json!("OK"));
}

#[actix_web::test]
async fn majors_lists_the_catalog_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test::init_service(build_app(test_state(&dir))).await;

    let req = test::TestRequest::get().uri("/api/majors").to_request();
    let majors: Value = test::call_and_read_body_json(&app, req).await;
    let majors = majors.as_array().expect("array of majors");
    assert!(!majors.is_empty());
    assert_eq!(majors[0], json!("Computer Science"));
}

#[actix_web::test]
async fn courses_flatten_every_major_with_an_annotation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test::init_service(build_app(test_state(&dir))).await;

    let req = test::TestRequest::get().uri("/api/majors").to_request();
    let majors: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get().uri("/api/courses").to_request();
    let courses: Value = test::call_and_read_body_json(&app, req).await;
    let courses = courses.as_array().expect("array of courses");
    assert!(!courses.is_empty());
    for course in courses {
        assert!(course.get("id").is_some());
        let major = course.get("major").and_then(Value::as_str).expect("major");
        assert!(majors.as_array().expect("majors").iter().any(|m| m == major));
    }
}

#[actix_web::test]
async fn courses_by_major_returns_the_majors_courses() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test::init_service(build_app(test_state(&dir))).await;

    let req = test::TestRequest::get()
        .uri("/api/courses/Mathematics")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let courses: Value = test::read_body_json(res).await;
    let courses = courses.as_array().expect("array of courses");
    assert!(!courses.is_empty());
    assert_eq!(courses[0]["name"], json!("Calculus I"));
}

#[actix_web::test]
async fn unknown_majors_report_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test::init_service(build_app(test_state(&dir))).await;

    let req = test::TestRequest::get()
        .uri("/api/courses/Nonexistent")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "message": "Major not found" }));
}
