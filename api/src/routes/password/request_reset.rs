use actix_web::{web, HttpResponse};
use validator::Validate;

use cv_shared::types::response::MessageResponse;

use crate::dto::auth::PasswordResetRequest;
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Handler for POST /api/password-reset
///
/// Responds identically whether or not the email belongs to an
/// account, so the endpoint cannot be used to enumerate addresses.
pub async fn request_reset(
    state: web::Data<AppState>,
    request: web::Json<PasswordResetRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.password_reset.request(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new(
            "If an account exists for this email, a reset token has been sent.",
        )),
        Err(error) => domain_error_response(&error),
    }
}
