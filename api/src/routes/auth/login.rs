use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Handler for POST /api/login
///
/// Authenticates a username/password pair against an active account
/// and returns an opaque session token.
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.auth.login(&request.username, &request.password).await {
        Ok(session) => HttpResponse::Ok().json(LoginResponse {
            token: session.token,
        }),
        Err(error) => domain_error_response(&error),
    }
}
