use actix_web::{web, HttpResponse};
use validator::Validate;

use cv_core::errors::DomainError;
use cv_shared::types::response::{ErrorResponse, MessageResponse};

use crate::dto::auth::VerifyEmailRequest;
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Handler for POST /api/verify-email
///
/// Checks the submitted code against the pending account for the
/// (email, username) pair and activates it on success. An unknown or
/// already-activated pair is a client error on this route, so the
/// not-found case maps to 400 rather than 404.
pub async fn verify_email(
    state: web::Data<AppState>,
    request: web::Json<VerifyEmailRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .verification
        .verify(&request.email, &request.username, &request.verification_code)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new(
            "Email verified successfully. You can now log in.",
        )),
        Err(error @ DomainError::NotFound { .. }) => {
            HttpResponse::BadRequest().json(ErrorResponse::new("not_found", error.to_string()))
        }
        Err(error) => domain_error_response(&error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> VerifyEmailRequest {
        VerifyEmailRequest {
            email: "a@x.com".to_string(),
            username: "alice".to_string(),
            verification_code: "12345678".to_string(),
        }
    }

    #[test]
    fn test_verify_request_accepts_valid_input() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_verify_request_rejects_wrong_code_length() {
        let mut request = valid_request();
        request.verification_code = "1234567".to_string();
        assert!(request.validate().is_err());

        request.verification_code = "123456789".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_verify_request_rejects_bad_email() {
        let mut request = valid_request();
        request.email = "nope".to_string();
        assert!(request.validate().is_err());
    }
}
