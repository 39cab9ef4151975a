use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::{StreamExt, TryStreamExt};

use cv_shared::types::response::ErrorResponse;

use crate::dto::resume::ResumeInfo;
use crate::handlers::error::domain_error_response;
use crate::middleware::auth::AuthenticatedAccount;
use crate::state::AppState;

/// Handler for POST /api/resume/upload
///
/// Multipart form with a `title` text field and a `file` PDF part.
/// The body is read fully into memory; reads stop one byte past the
/// configured cap so the service can reject oversize files without
/// the handler buffering arbitrary input.
pub async fn upload(
    state: web::Data<AppState>,
    auth: AuthenticatedAccount,
    mut payload: Multipart,
) -> HttpResponse {
    let mut title = String::new();
    let mut filename = String::new();
    let mut bytes: Vec<u8> = Vec::new();
    let byte_cap = state.upload.max_resume_bytes + 1;

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return HttpResponse::BadRequest().json(ErrorResponse::new(
                    "upload_error",
                    format!("malformed multipart body: {}", e),
                ));
            }
        };

        match field.name() {
            "title" => {
                let mut raw = Vec::new();
                while let Some(chunk) = field.next().await {
                    match chunk {
                        Ok(data) => raw.extend_from_slice(&data),
                        Err(e) => {
                            return HttpResponse::BadRequest().json(ErrorResponse::new(
                                "upload_error",
                                format!("failed to read title field: {}", e),
                            ));
                        }
                    }
                }
                title = String::from_utf8_lossy(&raw).into_owned();
            }
            "file" => {
                filename = field
                    .content_disposition()
                    .get_filename()
                    .unwrap_or_default()
                    .to_string();

                while let Some(chunk) = field.next().await {
                    match chunk {
                        Ok(data) => {
                            if bytes.len() < byte_cap {
                                let room = byte_cap - bytes.len();
                                bytes.extend_from_slice(&data[..data.len().min(room)]);
                            }
                        }
                        Err(e) => {
                            return HttpResponse::BadRequest().json(ErrorResponse::new(
                                "upload_error",
                                format!("failed to read file field: {}", e),
                            ));
                        }
                    }
                }
            }
            _ => {
                // Drain unknown fields so the stream stays consumable.
                while field.next().await.is_some() {}
            }
        }
    }

    match state
        .resumes
        .upload(&auth.account, &title, &filename, bytes)
        .await
    {
        Ok(resume) => HttpResponse::Created().json(ResumeInfo::from(&resume)),
        Err(error) => domain_error_response(&error),
    }
}
