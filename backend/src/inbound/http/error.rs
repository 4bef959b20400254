//! HTTP error payloads and mapping from domain errors.
//!
//! Keeps the domain free of transport concerns by translating [`Error`]
//! into Actix responses here. The wire payload is a bare `{"message"}`
//! object; the failure category is expressed through the status code alone,
//! and the request's trace identifier travels in the `Trace-Id` header.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

/// Wire payload for failed requests.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorMessage {
    /// Human-readable description of the failure.
    #[schema(example = "Student not found")]
    pub message: String,
}

/// Error returned by HTTP handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError(Error);

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Constructor used by body deserialisation hooks.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self(Error::invalid_request(message))
    }

    fn status(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.message())
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.0.code() == ErrorCode::Internal {
            // Internal details belong in the logs, not on the wire.
            error!(message = %self.0.message(), "request failed");
            return HttpResponse::build(self.status()).json(ErrorMessage {
                message: "Internal server error".to_owned(),
            });
        }
        HttpResponse::build(self.status()).json(ErrorMessage {
            message: self.0.message().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_error_code() {
        assert_eq!(
            ApiError::from(Error::invalid_request("bad")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(Error::not_found("gone")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(Error::internal("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn not_found_payload_is_a_bare_message_object() {
        let response = ApiError::from(Error::not_found("Student not found")).error_response();
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value, serde_json::json!({ "message": "Student not found" }));
    }

    #[actix_web::test]
    async fn internal_payloads_are_redacted() {
        let response = ApiError::from(Error::internal("disk on fire")).error_response();
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(
            value,
            serde_json::json!({ "message": "Internal server error" })
        );
    }
}
