//! Core services

pub mod auth;
pub mod password_reset;
pub mod profile;
pub mod resume;
pub mod verification;
