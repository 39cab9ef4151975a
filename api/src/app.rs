//! Route table and health endpoint.

use actix_web::{web, HttpResponse};

use crate::routes::auth::{login, logout, register, verify_email};
use crate::routes::password::{confirm_reset, request_reset};
use crate::routes::profile::{overview, public_view, update};
use crate::routes::resume::{delete, download, upload, view};
use crate::state::AppState;

/// Register every route on the service config.
///
/// Route order matters inside /api: the fixed profile paths must be
/// registered before the `{username}` catch-all.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api")
            .route("/signup", web::post().to(register::register))
            .route("/verify-email", web::post().to(verify_email::verify_email))
            .route("/login", web::post().to(login::login))
            .route("/logout", web::post().to(logout::logout))
            .route("/password-reset", web::post().to(request_reset::request_reset))
            .route(
                "/password-reset/confirm/{token}",
                web::post().to(confirm_reset::confirm_reset),
            )
            .route("/profile", web::get().to(overview::overview))
            .route("/profile/update", web::put().to(update::update))
            .route("/profile/update", web::patch().to(update::update))
            .route("/profile/{username}", web::get().to(public_view::public_view))
            .route("/resume/upload", web::post().to(upload::upload))
            .route("/resume/delete/{id}", web::delete().to(delete::delete))
            .route("/resume/view/{username}", web::get().to(view::view))
            .route(
                "/resume/download/{username}",
                web::get().to(download::download),
            ),
    );
}

/// Handler for GET /health
///
/// Reports process liveness plus the state of both backing stores.
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = state.db.health_check().await.unwrap_or(false);
    let cache = state.redis.health_check().await.unwrap_or(false);
    let healthy = database && cache;

    let body = serde_json::json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "service": "cvhub-api",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "cache": cache,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
