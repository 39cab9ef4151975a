//! Configuration modules for the CVHub backend.
//!
//! Each concern gets its own config struct with a `Default` impl and a
//! `from_env()` constructor. `main` loads them once after `dotenvy::dotenv()`.

pub mod cache;
pub mod database;
pub mod email;
pub mod server;
pub mod upload;
pub mod verification;

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use server::ServerConfig;
pub use upload::UploadConfig;
pub use verification::VerificationConfig;
