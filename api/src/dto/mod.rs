//! Request and response data transfer objects

pub mod auth;
pub mod profile;
pub mod resume;
