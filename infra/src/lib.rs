//! Infrastructure layer for CVHub.
//!
//! Concrete implementations of the core's persistence and delivery
//! traits: MySQL repositories via SQLx, a Redis-backed counter store,
//! SMTP (and mock) mailers via lettre, and filesystem resume storage.

pub mod cache;
pub mod database;
pub mod email;
pub mod storage;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Email transport error
    #[error("Email error: {0}")]
    Email(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File storage error
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}
