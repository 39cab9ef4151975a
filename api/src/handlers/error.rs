//! Mapping from domain errors to HTTP responses.
//!
//! Every handler funnels failures through `domain_error_response` so
//! clients always see the same envelope: a stable error code, a
//! human-readable message, optional details and a timestamp.

use actix_web::HttpResponse;

use cv_core::errors::DomainError;
use cv_shared::types::response::ErrorResponse;

/// Convert a domain error to its HTTP response
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { .. } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", error.to_string()))
        }
        DomainError::Conflict { .. } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("conflict", error.to_string()))
        }
        DomainError::Throttled {
            retry_after_seconds,
        } => HttpResponse::BadRequest().json(
            ErrorResponse::new("too_many_attempts", error.to_string())
                .with_detail("retry_after", serde_json::json!(retry_after_seconds)),
        ),
        DomainError::AmbiguousMatch => {
            HttpResponse::BadRequest().json(ErrorResponse::new("ambiguous_match", error.to_string()))
        }
        DomainError::InvalidCode => {
            HttpResponse::BadRequest().json(ErrorResponse::new("invalid_code", error.to_string()))
        }
        DomainError::InvalidCredentials => HttpResponse::BadRequest().json(ErrorResponse::new(
            "invalid_credentials",
            error.to_string(),
        )),
        DomainError::NotFound { .. } => {
            HttpResponse::NotFound().json(ErrorResponse::new("not_found", error.to_string()))
        }
        DomainError::Unauthorized => {
            HttpResponse::Unauthorized().json(ErrorResponse::new("unauthorized", error.to_string()))
        }
        DomainError::Internal { message } => {
            tracing::error!(error = %message, "Internal error");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                "An internal error occurred",
            ))
        }
    }
}

/// Build the 400 response for a failed request-body validation
pub fn validation_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(
        ErrorResponse::new("validation_error", "Invalid request data")
            .with_detail("validation_errors", serde_json::json!(errors)),
    )
}
