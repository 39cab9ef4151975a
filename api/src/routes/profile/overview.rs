use actix_web::{web, HttpResponse};

use crate::dto::profile::ProfileResponse;
use crate::handlers::error::domain_error_response;
use crate::middleware::auth::AuthenticatedAccount;
use crate::state::AppState;

/// Handler for GET /api/profile
///
/// Returns the authenticated account's profile page: account fields,
/// profile fields and the resume, when one is uploaded.
pub async fn overview(state: web::Data<AppState>, auth: AuthenticatedAccount) -> HttpResponse {
    match state.profiles.overview(auth.account).await {
        Ok(overview) => HttpResponse::Ok().json(ProfileResponse::from(&overview)),
        Err(error) => domain_error_response(&error),
    }
}
