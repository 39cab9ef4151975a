use actix_web::{web, HttpResponse};

use crate::dto::profile::PublicProfileResponse;
use crate::handlers::error::domain_error_response;
use crate::state::AppState;

/// Handler for GET /api/profile/{username}
///
/// Public profile page for an active account. Inactive and unknown
/// usernames both return 404.
pub async fn public_view(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let username = path.into_inner();

    match state.profiles.public_profile(&username).await {
        Ok(overview) => HttpResponse::Ok().json(PublicProfileResponse::from(&overview)),
        Err(error) => domain_error_response(&error),
    }
}
