use actix_web::{web, HttpResponse};
use validator::Validate;

use cv_shared::types::response::MessageResponse;

use crate::dto::auth::PasswordResetConfirmRequest;
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Handler for POST /api/password-reset/confirm/{token}
///
/// Consumes the emailed token and sets the new password. The token is
/// single use and expires after an hour.
pub async fn confirm_reset(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<PasswordResetConfirmRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let token = path.into_inner();

    match state
        .password_reset
        .confirm(&token, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password has been reset.")),
        Err(error) => domain_error_response(&error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_request_rejects_short_password() {
        let request = PasswordResetConfirmRequest {
            new_password: "pw".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_confirm_request_accepts_valid_password() {
        let request = PasswordResetConfirmRequest {
            new_password: "pw123456".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
