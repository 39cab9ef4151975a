//! HTTP API layer for CVHub.
//!
//! Thin actix-web handlers over the core services: request DTOs with
//! validation, a token-based auth extractor, and a uniform mapping
//! from domain errors to HTTP responses.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use state::AppState;
