use actix_web::{web, HttpResponse};
use uuid::Uuid;

use cv_shared::types::response::{ErrorResponse, MessageResponse};

use crate::handlers::error::domain_error_response;
use crate::middleware::auth::AuthenticatedAccount;
use crate::state::AppState;

/// Handler for DELETE /api/resume/delete/{id}
///
/// Owner-only: a resume belonging to another account is
/// indistinguishable from one that does not exist.
pub async fn delete(
    state: web::Data<AppState>,
    auth: AuthenticatedAccount,
    path: web::Path<String>,
) -> HttpResponse {
    let resume_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "validation_error",
                "resume id must be a UUID",
            ));
        }
    };

    match state.resumes.delete(&auth.account, resume_id).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Resume deleted.")),
        Err(error) => domain_error_response(&error),
    }
}
