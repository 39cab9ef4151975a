use actix_web::{web, HttpResponse};

use crate::dto::profile::{ProfileResponse, UpdateProfileRequest};
use crate::handlers::error::domain_error_response;
use crate::middleware::auth::AuthenticatedAccount;
use crate::state::AppState;

/// Handler for PUT/PATCH /api/profile/update
///
/// Partial update: absent fields are untouched. Username and email
/// changes are re-validated and collision-checked by the service.
pub async fn update(
    state: web::Data<AppState>,
    auth: AuthenticatedAccount,
    request: web::Json<UpdateProfileRequest>,
) -> HttpResponse {
    match state
        .profiles
        .update(auth.account, request.into_inner().into())
        .await
    {
        Ok(overview) => HttpResponse::Ok().json(ProfileResponse::from(&overview)),
        Err(error) => domain_error_response(&error),
    }
}
