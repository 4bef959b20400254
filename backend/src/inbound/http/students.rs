//! Student registration endpoints.
//!
//! ```text
//! POST   /api/students/register              {"name","email"}
//! POST   /api/students/complete-registration {"name"?,"email","selectedCourses":[...]}
//! POST   /api/students/register-course       {"email","course"}
//! GET    /api/students
//! GET    /api/students/email/{email}
//! PUT    /api/students/{id}/update-courses   {"selectedCourses":[...]}
//! DELETE /api/students/{id}
//! ```
//!
//! Mutating endpoints answer with a `{message, student}` envelope; reads
//! answer with the bare record. Required fields are modelled as options so
//! a missing field surfaces as the endpoint's own validation message rather
//! than a deserialisation failure.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Course, Error, RegistrationOutcome, Student};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorMessage;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/students/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Request body for `POST /api/students/complete-registration`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRegistrationRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub selected_courses: Option<Vec<Course>>,
}

/// Request body for `POST /api/students/register-course`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterCourseRequest {
    pub email: Option<String>,
    pub course: Option<Course>,
}

/// Request body for `PUT /api/students/{id}/update-courses`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCoursesRequest {
    pub selected_courses: Option<Vec<Course>>,
}

/// Envelope returned by mutating endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentEnvelope {
    #[schema(example = "Registration complete")]
    pub message: String,
    pub student: Student,
}

impl StudentEnvelope {
    fn new(message: impl Into<String>, student: Student) -> Self {
        Self {
            message: message.into(),
            student,
        }
    }
}

fn upsert_response(
    outcome: RegistrationOutcome,
    created_message: &str,
    existing_message: &str,
) -> HttpResponse {
    if outcome.created {
        HttpResponse::Created().json(StudentEnvelope::new(created_message, outcome.student))
    } else {
        HttpResponse::Ok().json(StudentEnvelope::new(existing_message, outcome.student))
    }
}

/// Register a student by name and email.
///
/// Replayed registrations for a known email return the existing record
/// unchanged with a 200.
#[utoipa::path(
    post,
    path = "/api/students/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Student registered", body = StudentEnvelope),
        (status = 200, description = "Email already registered", body = StudentEnvelope),
        (status = 400, description = "Missing fields", body = ErrorMessage)
    ),
    tags = ["students"],
    operation_id = "registerStudent"
)]
#[post("/students/register")]
pub async fn register(
    state: web::Data<HttpState>,
    body: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let outcome = state
        .registration
        .register(
            body.name.as_deref().unwrap_or_default(),
            body.email.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(upsert_response(
        outcome,
        "Registration complete",
        "Student already registered",
    ))
}

/// Create a student with an initial course selection, or merge further
/// courses into an existing record.
#[utoipa::path(
    post,
    path = "/api/students/complete-registration",
    request_body = CompleteRegistrationRequest,
    responses(
        (status = 201, description = "Student created with courses", body = StudentEnvelope),
        (status = 200, description = "Courses merged into existing record", body = StudentEnvelope),
        (status = 400, description = "Invalid body", body = ErrorMessage)
    ),
    tags = ["students"],
    operation_id = "completeRegistration"
)]
#[post("/students/complete-registration")]
pub async fn complete_registration(
    state: web::Data<HttpState>,
    body: web::Json<CompleteRegistrationRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let courses = body
        .selected_courses
        .ok_or_else(|| Error::invalid_request("Email and selected courses are required"))?;
    let outcome = state
        .registration
        .complete_registration(
            body.name.as_deref(),
            body.email.as_deref().unwrap_or_default(),
            courses,
        )
        .await?;
    Ok(upsert_response(
        outcome,
        "Registration complete",
        "Courses added successfully",
    ))
}

/// Add a single course to a student, creating a placeholder record when the
/// email is unknown.
#[utoipa::path(
    post,
    path = "/api/students/register-course",
    request_body = RegisterCourseRequest,
    responses(
        (status = 200, description = "Course registered", body = StudentEnvelope),
        (status = 400, description = "Missing fields", body = ErrorMessage)
    ),
    tags = ["students"],
    operation_id = "registerCourse"
)]
#[post("/students/register-course")]
pub async fn register_course(
    state: web::Data<HttpState>,
    body: web::Json<RegisterCourseRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let course = body
        .course
        .ok_or_else(|| Error::invalid_request("Email and course are required"))?;
    let student = state
        .registration
        .register_course(body.email.as_deref().unwrap_or_default(), course)
        .await?;
    Ok(HttpResponse::Ok().json(StudentEnvelope::new(
        "Course registered successfully",
        student,
    )))
}

/// List all persisted students.
#[utoipa::path(
    get,
    path = "/api/students",
    responses((status = 200, description = "All students", body = [Student])),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Student>>> {
    Ok(web::Json(state.registration.list().await?))
}

/// Fetch a student by email, case-insensitively.
#[utoipa::path(
    get,
    path = "/api/students/email/{email}",
    params(("email" = String, Path, description = "Student email, any casing")),
    responses(
        (status = 200, description = "Student record", body = Student),
        (status = 404, description = "Unknown email", body = ErrorMessage)
    ),
    tags = ["students"],
    operation_id = "getStudentByEmail"
)]
#[get("/students/email/{email}")]
pub async fn get_by_email(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Student>> {
    let email = path.into_inner();
    Ok(web::Json(state.registration.get_by_email(&email).await?))
}

/// Replace a student's course selection.
#[utoipa::path(
    put,
    path = "/api/students/{id}/update-courses",
    params(("id" = u64, Path, description = "Student identifier")),
    request_body = UpdateCoursesRequest,
    responses(
        (status = 200, description = "Selection updated", body = StudentEnvelope),
        (status = 404, description = "Unknown student", body = ErrorMessage)
    ),
    tags = ["students"],
    operation_id = "updateCourses"
)]
#[put("/students/{id}/update-courses")]
pub async fn update_courses(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    body: web::Json<UpdateCoursesRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let student = state
        .registration
        .update_courses(id, body.into_inner().selected_courses)
        .await?;
    Ok(HttpResponse::Ok().json(StudentEnvelope::new("Courses updated successfully", student)))
}

/// Delete a student record.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = u64, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Deleted record", body = StudentEnvelope),
        (status = 404, description = "Unknown student", body = ErrorMessage)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let student = state.registration.delete_student(id).await?;
    Ok(HttpResponse::Ok().json(StudentEnvelope::new("Student deleted successfully", student)))
}
