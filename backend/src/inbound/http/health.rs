//! Health endpoint.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Response payload for the health check.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"OK"` while the process can answer requests.
    #[schema(example = "OK")]
    pub status: &'static str,
    pub message: &'static str,
}

/// Liveness check for load balancers and smoke tests.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Server is running", body = HealthResponse)),
    tags = ["health"],
    operation_id = "health"
)]
#[get("/health")]
pub async fn health() -> web::Json<HealthResponse> {
    web::Json(HealthResponse {
        status: "OK",
        message: "EduTutor Pro API is running",
    })
}
