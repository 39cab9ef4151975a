use actix_web::{web, HttpResponse};

use cv_shared::types::response::MessageResponse;

use crate::handlers::error::domain_error_response;
use crate::middleware::auth::AuthenticatedAccount;
use crate::state::AppState;

/// Handler for POST /api/logout
///
/// Invalidates the presented session token. Idempotent from the
/// client's view: the token is gone either way.
pub async fn logout(state: web::Data<AppState>, auth: AuthenticatedAccount) -> HttpResponse {
    match state.auth.logout(&auth.token).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Logged out.")),
        Err(error) => domain_error_response(&error),
    }
}
