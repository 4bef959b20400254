//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every endpoint from the inbound layer plus the request and
//! response schemas they reference. The generated document backs Swagger UI
//! in debug builds.

use utoipa::OpenApi;

use crate::domain::student::{Course, Student};
use crate::inbound::http::error::ErrorMessage;
use crate::inbound::http::health::HealthResponse;
use crate::inbound::http::students::{
    CompleteRegistrationRequest, RegisterCourseRequest, RegisterRequest, StudentEnvelope,
    UpdateCoursesRequest,
};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "EduTutor Pro backend API",
        description = "HTTP interface for the course catalog and student registration records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::health,
        crate::inbound::http::catalog::list_majors,
        crate::inbound::http::catalog::list_all_courses,
        crate::inbound::http::catalog::courses_by_major,
        crate::inbound::http::students::register,
        crate::inbound::http::students::complete_registration,
        crate::inbound::http::students::register_course,
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::get_by_email,
        crate::inbound::http::students::update_courses,
        crate::inbound::http::students::delete_student,
    ),
    components(schemas(
        Student,
        Course,
        ErrorMessage,
        HealthResponse,
        StudentEnvelope,
        RegisterRequest,
        CompleteRegistrationRequest,
        RegisterCourseRequest,
        UpdateCoursesRequest,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "catalog", description = "Major and course catalog reads"),
        (name = "students", description = "Student registration records")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/health",
            "/api/majors",
            "/api/courses",
            "/api/courses/{majorName}",
            "/api/students/register",
            "/api/students/complete-registration",
            "/api/students/register-course",
            "/api/students",
            "/api/students/email/{email}",
            "/api/students/{id}/update-courses",
            "/api/students/{id}",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected} in {paths:?}"
            );
        }
    }
}
