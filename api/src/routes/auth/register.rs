use actix_web::{web, HttpResponse};
use validator::Validate;

use cv_shared::types::response::MessageResponse;

use crate::dto::auth::RegisterRequest;
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Handler for POST /api/signup
///
/// Creates an inactive account and emails an 8-digit verification
/// code. Re-submitting the same (email, username) pair before
/// verification overwrites the pending credential and issues a fresh
/// code.
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth
        .register(&request.username, &request.email, &request.password)
        .await
    {
        Ok(_) => HttpResponse::Created().json(MessageResponse::new(
            "Account created. Check your email for the verification code.",
        )),
        Err(error) => domain_error_response(&error),
    }
}
