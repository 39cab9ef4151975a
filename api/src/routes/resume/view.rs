use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};

use crate::handlers::error::domain_error_response;
use crate::state::AppState;

/// Handler for GET /api/resume/view/{username}
///
/// Serves the user's resume inline so browsers render the PDF.
pub async fn view(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let username = path.into_inner();

    match state.resumes.fetch_for(&username).await {
        Ok(stored) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Inline,
                parameters: vec![DispositionParam::Filename(format!("{}.pdf", username))],
            })
            .body(stored.bytes),
        Err(error) => domain_error_response(&error),
    }
}
