//! Course catalog read endpoints.
//!
//! ```text
//! GET /api/majors
//! GET /api/courses
//! GET /api/courses/{majorName}
//! ```

use actix_web::{get, web};

use crate::domain::{Course, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorMessage;
use crate::inbound::http::state::HttpState;

/// List the major names offered by the catalog.
#[utoipa::path(
    get,
    path = "/api/majors",
    responses((status = 200, description = "Major names", body = [String])),
    tags = ["catalog"],
    operation_id = "listMajors"
)]
#[get("/majors")]
pub async fn list_majors(state: web::Data<HttpState>) -> web::Json<Vec<String>> {
    web::Json(state.catalog.majors())
}

/// List every course across all majors, annotated with its owning major.
#[utoipa::path(
    get,
    path = "/api/courses",
    responses((status = 200, description = "Flattened course list", body = [Course])),
    tags = ["catalog"],
    operation_id = "listAllCourses"
)]
#[get("/courses")]
pub async fn list_all_courses(state: web::Data<HttpState>) -> web::Json<Vec<Course>> {
    web::Json(state.catalog.all_courses())
}

/// List the courses of a single major.
#[utoipa::path(
    get,
    path = "/api/courses/{majorName}",
    params(("majorName" = String, Path, description = "Exact major name")),
    responses(
        (status = 200, description = "Courses for the major", body = [Course]),
        (status = 404, description = "Unknown major", body = ErrorMessage)
    ),
    tags = ["catalog"],
    operation_id = "listCoursesByMajor"
)]
#[get("/courses/{major_name}")]
pub async fn courses_by_major(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Course>>> {
    let major_name = path.into_inner();
    let courses = state
        .catalog
        .courses_for(&major_name)
        .ok_or_else(|| Error::not_found("Major not found"))?;
    Ok(web::Json(courses.to_vec()))
}
