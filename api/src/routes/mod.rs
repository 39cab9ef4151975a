//! HTTP route handlers

pub mod auth;
pub mod password;
pub mod profile;
pub mod resume;
