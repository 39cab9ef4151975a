//! CVHub API server entry point.

use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cv_api::{app, AppState};
use cv_api::middleware::cors::create_cors;
use cv_shared::config::{
    CacheConfig, DatabaseConfig, EmailConfig, ServerConfig, UploadConfig, VerificationConfig,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CVHub API server");

    let server = ServerConfig::from_env();
    let database = DatabaseConfig::from_env();
    let cache = CacheConfig::from_env();
    let email = EmailConfig::from_env();
    let upload = UploadConfig::from_env();
    let verification = VerificationConfig::from_env();

    let state = AppState::build(&database, &cache, &email, &upload, verification)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to initialize application state");
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
        })?;
    let state = web::Data::new(state);

    let bind_address = server.bind_address();
    tracing::info!(address = %bind_address, "Binding HTTP server");

    let mut http_server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(create_cors())
            .configure(app::configure)
            .default_service(web::route().to(app::not_found))
    })
    .bind(&bind_address)?;

    if server.workers > 0 {
        http_server = http_server.workers(server.workers);
    }

    http_server.run().await
}
